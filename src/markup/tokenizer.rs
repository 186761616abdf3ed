//! 分段器
//!
//! 把规范化后的片段切分为有序的数学段和普通段，按原文顺序拼接回去与输入完全一致

use regex::Regex;
use std::sync::LazyLock;

/// 数学段的判定模式：分数宏、根号宏、字母串、纯数字分数、单个比较/运算符号
const MATH_PATTERN: &str =
    r"\\frac\{[^{}]*\}\{[^{}]*\}|\\sqrt\{[^{}]*\}|[A-Za-z]+|[0-9]+/[0-9]+|[=+\-−×÷≤≥<>^]";

static MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MATH_PATTERN).expect("数学段正则无效"));

static MATH_EXACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^(?:{})$", MATH_PATTERN)).expect("数学段正则无效"));

/// 段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// 交给排版引擎
    Math,
    /// 普通文本
    Plain,
}

/// 片段中的一段，借用自输入字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

impl<'a> Segment<'a> {
    fn classify(text: &'a str) -> Self {
        let kind = if is_math_like(text) {
            SegmentKind::Math
        } else {
            SegmentKind::Plain
        };
        Self { text, kind }
    }

    pub fn is_math(&self) -> bool {
        self.kind == SegmentKind::Math
    }
}

/// 整段文本是否完整匹配数学模式
pub fn is_math_like(text: &str) -> bool {
    MATH_EXACT_RE.is_match(text)
}

/// 切分片段
///
/// 每个匹配成为一段，匹配之间的文本成为一段，空段丢弃。
/// 段类型由 [`is_math_like`] 重新判定，渲染器因此不依赖切分方式。
pub fn tokenize(fragment: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for m in MATH_RE.find_iter(fragment) {
        if m.start() > last_end {
            segments.push(Segment::classify(&fragment[last_end..m.start()]));
        }
        segments.push(Segment::classify(m.as_str()));
        last_end = m.end();
    }

    if last_end < fragment.len() {
        segments.push(Segment::classify(&fragment[last_end..]));
    }

    segments
}
