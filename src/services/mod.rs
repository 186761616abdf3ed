pub mod preview_service;
pub mod print_service;

pub use preview_service::PreviewService;
pub use print_service::{PrintOptions, PrintService};
