//! 基础设施层
//!
//! 持有外部资源（排版程序），只暴露能力

pub mod typeset_command;

pub use typeset_command::CommandEngine;

use std::sync::Arc;

use crate::config::Config;
use crate::markup::{NoEngine, TypesetEngine};

/// 按配置选择排版引擎
pub fn engine_from_config(config: &Config) -> Arc<dyn TypesetEngine> {
    let Some(program) = &config.typeset_command else {
        return Arc::new(NoEngine);
    };
    Arc::new(CommandEngine::new(program).with_args(config.typeset_args.clone()))
}
