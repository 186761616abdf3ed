use serde::{Deserialize, Serialize};

/// 题目发布状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    #[default]
    Draft,
    Published,
}

impl QuestionStatus {
    /// 切换后的状态
    pub fn toggled(self) -> Self {
        match self {
            QuestionStatus::Draft => QuestionStatus::Published,
            QuestionStatus::Published => QuestionStatus::Draft,
        }
    }

    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// 中文标签
    pub fn label(self) -> &'static str {
        match self {
            QuestionStatus::Draft => "草稿",
            QuestionStatus::Published => "已发布",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionStatus::Draft => "draft",
            QuestionStatus::Published => "published",
        }
    }
}

/// 单选题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,

    #[serde(default)]
    pub options: Vec<String>,

    /// 正确答案，可以写成选项字母，也可以写成数字
    #[serde(default, deserialize_with = "deserialize_answer")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    #[serde(default = "default_marks")]
    pub marks: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub status: QuestionStatus,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            text: String::new(),
            options: Vec::new(),
            answer: None,
            marks: default_marks(),
            image_url: None,
            status: QuestionStatus::default(),
        }
    }
}

impl Question {
    pub fn is_published(&self) -> bool {
        self.status == QuestionStatus::Published
    }
}

fn default_marks() -> u32 {
    1
}

/// 试卷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPaper {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl QuestionPaper {
    /// 已发布题目
    pub fn published(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.is_published())
    }

    /// 全部题目总分
    pub fn total_marks(&self) -> u32 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

// 答案既可以是字符串也可以是整数
fn deserialize_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct AnswerVisitor;

    impl<'de> Visitor<'de> for AnswerVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing an answer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(AnswerVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER: &str = r#"
title = "七年级数学周测"
subject = "数学"

[[questions]]
text = "计算 1/2 + 1/4"
options = ["3/4", "1/6", "2/6", "1"]
answer = "A"
marks = 2
status = "published"

[[questions]]
text = "sqrt(16) 等于多少"
options = ["2", "4", "8", "16"]
answer = 1
"#;

    #[test]
    fn test_parse_paper() {
        let paper: QuestionPaper = toml::from_str(PAPER).unwrap();
        assert_eq!(paper.title, "七年级数学周测");
        assert_eq!(paper.questions.len(), 2);

        let first = &paper.questions[0];
        assert_eq!(first.answer.as_deref(), Some("A"));
        assert_eq!(first.marks, 2);
        assert_eq!(first.status, QuestionStatus::Published);

        let second = &paper.questions[1];
        assert_eq!(second.answer.as_deref(), Some("1"));
        assert_eq!(second.marks, 1);
        assert_eq!(second.status, QuestionStatus::Draft);
        assert!(second.image_url.is_none());
    }

    #[test]
    fn test_missing_answer_is_none() {
        let question: Question = toml::from_str(r#"text = "x""#).unwrap();
        assert!(question.answer.is_none());
    }

    #[test]
    fn test_paper_totals() {
        let paper: QuestionPaper = toml::from_str(PAPER).unwrap();
        assert_eq!(paper.total_marks(), 3);
        assert_eq!(paper.published().count(), 1);
    }

    #[test]
    fn test_status_toggle() {
        let mut status = QuestionStatus::default();
        assert_eq!(status, QuestionStatus::Draft);
        status.toggle();
        assert_eq!(status, QuestionStatus::Published);
        assert_eq!(status.toggled(), QuestionStatus::Draft);
        assert_eq!(status.as_str(), "published");
    }
}
