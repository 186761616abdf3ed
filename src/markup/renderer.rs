//! 分段渲染

use tracing::warn;

use crate::markup::engine::{TypesetEngine, TypesetOptions};
use crate::markup::sanitizer::escape;
use crate::markup::tokenizer::{Segment, SegmentKind};

/// 引擎不可用时包裹数学段的标记
const CODE_OPEN: &str = "<code>";
const CODE_CLOSE: &str = "</code>";

/// 按顺序渲染所有段并拼接
pub fn render(segments: &[Segment<'_>], engine: &dyn TypesetEngine) -> String {
    segments.iter().fold(String::new(), |mut out, segment| {
        out.push_str(&render_segment(segment, engine));
        out
    })
}

fn render_segment(segment: &Segment<'_>, engine: &dyn TypesetEngine) -> String {
    match segment.kind {
        SegmentKind::Plain => escape(segment.text),
        SegmentKind::Math if engine.is_available() => {
            match engine.render(segment.text, &TypesetOptions::inline()) {
                Ok(markup) => markup,
                Err(e) => {
                    warn!("数学段排版失败，按原文输出: {} ({})", segment.text, e);
                    escape(segment.text)
                }
            }
        }
        SegmentKind::Math => format!("{}{}{}", CODE_OPEN, escape(segment.text), CODE_CLOSE),
    }
}
