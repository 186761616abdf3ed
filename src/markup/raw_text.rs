//! 原始输入
//!
//! 题目字段可能缺失，也可能是数字或任意 JSON 值，这里统一转换为文本

use serde_json::Value as JsonValue;

/// 未经信任的原始题目字段
#[derive(Debug, Clone, PartialEq)]
pub enum RawText {
    /// 字段缺失
    Missing,
    Text(String),
    Integer(i128),
    Float(f64),
    Bool(bool),
    /// 数组或对象
    Json(JsonValue),
}

impl RawText {
    /// 转换为文本
    ///
    /// 缺失返回空字符串；数字 `0` 返回 `"0"`，不会被当作空值。
    pub fn into_text(self) -> String {
        match self {
            RawText::Missing => String::new(),
            RawText::Text(text) => text,
            RawText::Integer(n) => n.to_string(),
            RawText::Float(f) => float_text(f),
            RawText::Bool(b) => b.to_string(),
            RawText::Json(value) => value.to_string(),
        }
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        f.to_string()
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        RawText::Text(text.to_string())
    }
}

impl From<String> for RawText {
    fn from(text: String) -> Self {
        RawText::Text(text)
    }
}

impl From<&String> for RawText {
    fn from(text: &String) -> Self {
        RawText::Text(text.clone())
    }
}

impl<T: Into<RawText>> From<Option<T>> for RawText {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawText::Missing, Into::into)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawText {
                fn from(n: $ty) -> Self {
                    RawText::Integer(n as i128)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f32> for RawText {
    fn from(f: f32) -> Self {
        RawText::Float(f as f64)
    }
}

impl From<f64> for RawText {
    fn from(f: f64) -> Self {
        RawText::Float(f)
    }
}

impl From<bool> for RawText {
    fn from(b: bool) -> Self {
        RawText::Bool(b)
    }
}

impl From<&JsonValue> for RawText {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => RawText::Missing,
            JsonValue::String(s) => RawText::Text(s.clone()),
            JsonValue::Bool(b) => RawText::Bool(*b),
            JsonValue::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => RawText::Integer(i as i128),
                (_, Some(u), _) => RawText::Integer(u as i128),
                (_, _, Some(f)) => RawText::Float(f),
                _ => RawText::Text(n.to_string()),
            },
            other => RawText::Json(other.clone()),
        }
    }
}

impl From<JsonValue> for RawText {
    fn from(value: JsonValue) -> Self {
        RawText::from(&value)
    }
}
