//! 题目文本 → 可嵌入标记
//!
//! ## 处理流程
//!
//! ```text
//! 原始文本 → normalizer（改写为 TeX 片段）→ tokenizer（切分数学段/普通段）
//!          → renderer（逐段排版或转义）→ 拼接后的标记
//! ```
//!
//! 整个流程是同步的纯函数，不读写任何全局状态，可以在多个任务里同时调用。
//! 输出已经完成最终转义，预览和打印都直接嵌入，不再二次转义。

pub mod engine;
pub mod normalizer;
pub mod raw_text;
pub mod renderer;
pub mod sanitizer;
pub mod tokenizer;

pub use engine::{NoEngine, TypesetEngine, TypesetError, TypesetOptions};
pub use normalizer::normalize;
pub use raw_text::RawText;
pub use renderer::render;
pub use sanitizer::escape;
pub use tokenizer::{is_math_like, tokenize, Segment, SegmentKind};

use std::panic::{self, AssertUnwindSafe};
use tracing::{trace, warn};

/// 不使用排版引擎渲染题目字段
pub fn render_markup(raw: impl Into<RawText>) -> String {
    render_markup_with(raw, &NoEngine)
}

/// 渲染题目字段
///
/// 任何输入都返回字符串。流程内部出现意外 panic 时，整段退化为转义后的原文。
pub fn render_markup_with(raw: impl Into<RawText>, engine: &dyn TypesetEngine) -> String {
    let text = raw.into().into_text();

    match panic::catch_unwind(AssertUnwindSafe(|| render_text(&text, engine))) {
        Ok(markup) => markup,
        Err(_) => {
            warn!("渲染流程异常，按转义原文输出 (长度: {})", text.len());
            escape(text.as_str())
        }
    }
}

fn render_text(text: &str, engine: &dyn TypesetEngine) -> String {
    let fragment = normalize(text);
    let segments = tokenize(&fragment);
    trace!("片段 {:?} 切分为 {} 段", fragment, segments.len());
    render(&segments, engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PanicEngine;

    impl TypesetEngine for PanicEngine {
        fn is_available(&self) -> bool {
            true
        }

        fn render(&self, _tex: &str, _opts: &TypesetOptions) -> Result<String, TypesetError> {
            panic!("engine crashed");
        }
    }

    struct EchoEngine;

    impl TypesetEngine for EchoEngine {
        fn is_available(&self) -> bool {
            true
        }

        fn render(&self, tex: &str, _opts: &TypesetOptions) -> Result<String, TypesetError> {
            Ok(format!("<span class=\"katex\">{}</span>", tex))
        }
    }

    #[test]
    fn test_never_fails_on_odd_input() {
        assert_eq!(render_markup(None::<&str>), "");
        assert_eq!(render_markup(RawText::Missing), "");
        assert_eq!(render_markup(""), "");
        assert_eq!(render_markup(12345), "12345");
        assert_eq!(render_markup(0), "0");
    }

    #[test]
    fn test_exponent_without_engine() {
        assert_eq!(render_markup("x^2"), "<code>x</code><code>^</code>{2}");
    }

    #[test]
    fn test_html_is_escaped() {
        let markup = render_markup("<script>alert(1)</script>");
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;"));
    }

    #[test]
    fn test_fraction_with_engine() {
        assert_eq!(
            render_markup_with("3/4", &EchoEngine),
            r#"<span class="katex">\frac{3}{4}</span>"#
        );
    }

    #[test]
    fn test_panic_degrades_to_escaped_original() {
        assert_eq!(
            render_markup_with("x < 'y'", &PanicEngine),
            "x &lt; &apos;y&apos;"
        );
    }
}
