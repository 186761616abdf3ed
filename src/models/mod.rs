pub mod loaders;
pub mod question;

pub use loaders::{load_all_papers, load_paper};
pub use question::{Question, QuestionPaper, QuestionStatus};
