//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量导出和流程调度，只做调度和统计，不做具体渲染。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<QuestionPaper>)
//!     ↓
//! paper_processor (处理单个 QuestionPaper)
//!     ↓
//! services (能力层：preview / print)
//!     ↓
//! markup (题目文本 → 标记)
//!     ↓
//! infrastructure (外部排版程序)
//! ```

pub mod batch_processor;
pub mod paper_processor;

pub use batch_processor::{App, ProcessingStats};
pub use paper_processor::{export_paper, output_path_for, ExportStats};
