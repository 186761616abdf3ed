//! # Question Markup
//!
//! 把题目文本（题干、选项、答案）渲染为可直接嵌入预览和打印页面的安全标记
//!
//! ## 架构设计
//!
//! ### ① 核心流程（Markup）
//! - `markup/` - 规范化 → 分段 → 渲染，纯函数，不会失败
//! - `render_markup` / `render_markup_with` - 唯一的对外入口
//!
//! ### ② 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部排版程序，只暴露排版能力
//!
//! ### ③ 业务能力层（Services）
//! - `PreviewService` - 单道题目 → HTML 卡片
//! - `PrintService` - 整张试卷 → 可打印的 HTML 文档
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量导出，管理并发
//! - `orchestrator/paper_processor` - 单张试卷导出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod markup;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use markup::{render_markup, render_markup_with, NoEngine, RawText, TypesetEngine};
pub use models::{Question, QuestionPaper, QuestionStatus};
pub use orchestrator::{App, ProcessingStats};
pub use services::{PreviewService, PrintOptions, PrintService};
