//! 排版引擎能力
//!
//! 渲染器通过 [`TypesetEngine`] 调用外部排版引擎，每个数学段都会重新检查可用性

use thiserror::Error;

/// 排版选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypesetOptions {
    /// 是否为块级公式
    pub display_mode: bool,
    /// 引擎遇到错误时是否直接失败（否则由引擎自行标红输出）
    pub throw_on_error: bool,
}

impl TypesetOptions {
    /// 行内模式，抑制引擎错误
    pub fn inline() -> Self {
        Self {
            display_mode: false,
            throw_on_error: false,
        }
    }
}

impl Default for TypesetOptions {
    fn default() -> Self {
        Self::inline()
    }
}

/// 排版引擎错误
#[derive(Debug, Error)]
pub enum TypesetError {
    #[error("排版引擎不可用")]
    Unavailable,

    #[error("无法启动排版程序 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("与排版程序通信失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("排版程序退出异常 ({status}): {stderr}")]
    Exit { status: String, stderr: String },

    #[error("排版输出不是有效的 UTF-8: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    #[error("排版引擎拒绝输入: {0}")]
    Rejected(String),
}

/// 排版引擎
///
/// 实现必须是同步的：`render` 返回时该段已经排版完成。
pub trait TypesetEngine: Send + Sync {
    /// 引擎当前是否可用，不允许缓存结果
    fn is_available(&self) -> bool;

    /// 把一个 TeX 片段渲染为可嵌入的标记
    fn render(&self, tex: &str, opts: &TypesetOptions) -> Result<String, TypesetError>;
}

/// 没有排版引擎
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEngine;

impl TypesetEngine for NoEngine {
    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _tex: &str, _opts: &TypesetOptions) -> Result<String, TypesetError> {
        Err(TypesetError::Unavailable)
    }
}
