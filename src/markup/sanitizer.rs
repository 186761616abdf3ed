//! 转义器
//!
//! 把任意文本转义为可以直接嵌入 HTML 的字符串

/// 转义 HTML 特殊字符
///
/// `None` 返回空字符串。`&` 必须最先替换，否则会把后面生成的实体再转义一次。
/// 对已经转义过的文本再次调用会重复编码，调用方只应在最终渲染时转义一次。
/// 五个字符都替换为命名实体，单引号使用 HTML5/XML 的 `&apos;`。
pub fn escape<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(text) = input.into() else {
        return String::new();
    };

    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_none() {
        assert_eq!(escape(None::<&str>), "");
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(
            escape(r#"<img src="x" onerror='a&b'>"#),
            "&lt;img src=&quot;x&quot; onerror=&apos;a&amp;b&apos;&gt;"
        );
    }

    #[test]
    fn test_apostrophe_uses_named_entity() {
        assert_eq!(escape("it's"), "it&apos;s");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        for text in ["", "0", "x^2 + 3/4", "求 sqrt(16) 的值", "a = b - c"] {
            assert_eq!(escape(text), text);
        }
    }

    #[test]
    fn test_escape_twice_double_encodes() {
        let once = escape("a < b");
        assert_eq!(once, "a &lt; b");
        assert_eq!(escape(once.as_str()), "a &amp;lt; b");
    }
}
