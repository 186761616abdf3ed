//! 记号规范化
//!
//! 把题目里的非正式数学写法（分数、根号、指数、常量）改写为 TeX 片段。
//!
//! 规则按固定顺序执行，后面的规则不会再匹配前面规则生成的内容：
//! 1. `(A)/(B)` → `\frac{A}{B}`
//! 2. `3/4` → `\frac{3}{4}`（只作用于规则 1 没有吃掉的文本）
//! 3. `sqrt(X)`（不区分大小写）→ `\sqrt{X}`
//! 4. `x^2` → `x^{2}`
//! 5. 独立的 `pi` / `e` → `\pi` / `\mathrm{e}`
//!
//! 这是基于正则的尽力改写，不是解析器：括号不配对时原样保留，
//! 匹配到的内部内容也不会递归规范化（`sqrt((1/2))` 会得到不完整的结果）。

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// 规则 1 和规则 2 合并为一次最左优先的扫描，保证分数内部不会被再次改写
///
/// 单词边界只按 ASCII 判断，汉字紧挨着分数时同样视为边界。
static FRACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([^()]+)\)/\(([^()]+)\)|(?-u:\b)([0-9]+)/([0-9]+)(?-u:\b)")
        .expect("分数正则无效")
});

static SQRT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)sqrt\(([^)]*)\)").expect("根号正则无效"));

static EXPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9)\]}])\^([A-Za-z0-9(\[]+)").expect("指数正则无效")
});

static CONSTANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)(pi|e)(?-u:\b)").expect("常量正则无效"));

/// 命名常量 → TeX 宏
static CONSTANTS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "pi" => r"\pi",
    "e" => r"\mathrm{e}",
};

/// 规范化一段题目文本
///
/// 对任何输入都返回字符串，不会失败。
pub fn normalize(plain: &str) -> String {
    if plain.is_empty() {
        return String::new();
    }

    let text = rewrite_fractions(plain);
    let text = rewrite_sqrt(&text);
    let text = rewrite_exponents(&text);
    rewrite_constants(&text)
}

fn rewrite_fractions(text: &str) -> String {
    FRACTION_RE
        .replace_all(text, |caps: &Captures| {
            match (caps.get(1), caps.get(2)) {
                (Some(num), Some(den)) => frac(num.as_str(), den.as_str()),
                _ => frac(&caps[3], &caps[4]),
            }
        })
        .into_owned()
}

fn rewrite_sqrt(text: &str) -> String {
    SQRT_RE
        .replace_all(text, |caps: &Captures| format!(r"\sqrt{{{}}}", &caps[1]))
        .into_owned()
}

fn rewrite_exponents(text: &str) -> String {
    EXPONENT_RE
        .replace_all(text, |caps: &Captures| format!("{}^{{{}}}", &caps[1], &caps[2]))
        .into_owned()
}

/// 替换独立单词形式的常量
///
/// 紧跟在 `\` 后面的单词已经是宏名（例如 `\pi`），保持不变。
fn rewrite_constants(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for m in CONSTANT_RE.find_iter(text) {
        let Some(&macro_text) = CONSTANTS.get(m.as_str()) else {
            continue;
        };
        if text[..m.start()].ends_with('\\') {
            continue;
        }
        result.push_str(&text[last_end..m.start()]);
        result.push_str(macro_text);
        last_end = m.end();
    }

    result.push_str(&text[last_end..]);
    result
}

fn frac(numerator: &str, denominator: &str) -> String {
    format!(r"\frac{{{}}}{{{}}}", numerator, denominator)
}
