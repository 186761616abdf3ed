//! 预览服务 - 业务能力层
//!
//! 只负责把单道题目渲染为一张 HTML 卡片，不关心试卷和输出位置

use std::sync::Arc;
use tracing::debug;

use crate::markup::{escape, render_markup_with, TypesetEngine};
use crate::models::Question;
use crate::utils::logging::truncate_text;

/// 预览服务
///
/// 题干和选项经过 markup 渲染后直接嵌入，不再二次转义；
/// 只有服务自己拼进属性的值（图片地址、状态）在这里转义。
#[derive(Clone)]
pub struct PreviewService {
    engine: Arc<dyn TypesetEngine>,
}

impl PreviewService {
    pub fn new(engine: Arc<dyn TypesetEngine>) -> Self {
        Self { engine }
    }

    /// 渲染任意题目字段
    pub fn render_field(&self, raw: &str) -> String {
        render_markup_with(raw, self.engine.as_ref())
    }

    /// 渲染一道题目
    ///
    /// # 参数
    /// - `question`: 题目
    /// - `number`: 题号（从 1 开始）
    pub fn render_question(&self, question: &Question, number: usize) -> String {
        debug!("渲染第 {} 题: {}", number, truncate_text(&question.text, 40));

        let mut html = String::new();
        html.push_str(&format!(
            "<div class=\"question-card\" data-status=\"{}\">\n",
            question.status.as_str()
        ));
        html.push_str(&format!(
            "  <div class=\"question-header\"><span class=\"question-number\">{}.</span> <span class=\"question-marks\">（{} 分）</span> <span class=\"question-status\">{}</span></div>\n",
            number,
            question.marks,
            question.status.label()
        ));
        html.push_str(&format!(
            "  <div class=\"question-text\">{}</div>\n",
            self.render_field(&question.text)
        ));

        if let Some(url) = question.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
            html.push_str(&format!(
                "  <img class=\"question-image\" src=\"{}\" alt=\"第 {} 题配图\">\n",
                escape(url),
                number
            ));
        }

        if !question.options.is_empty() {
            html.push_str("  <ol class=\"question-options\">\n");
            for (index, option) in question.options.iter().enumerate() {
                html.push_str(&format!(
                    "    <li><span class=\"option-label\">{}.</span> {}</li>\n",
                    option_label(index),
                    self.render_field(option)
                ));
            }
            html.push_str("  </ol>\n");
        }

        html.push_str("</div>\n");
        html
    }
}

/// 选项标签：A、B、C……超过 26 个后使用数字
pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::NoEngine;
    use crate::models::QuestionStatus;

    fn service() -> PreviewService {
        PreviewService::new(Arc::new(NoEngine))
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(25), "Z");
        assert_eq!(option_label(26), "27");
    }

    #[test]
    fn test_render_question_card() {
        let question = Question {
            text: "计算 3/4 + x".to_string(),
            options: vec!["1".to_string(), "<b>2</b>".to_string()],
            marks: 2,
            status: QuestionStatus::Published,
            ..Question::default()
        };

        let html = service().render_question(&question, 1);
        assert!(html.contains("data-status=\"published\""));
        assert!(html.contains("（2 分）"));
        assert!(html.contains(r"<code>\frac{3}{4}</code>"));
        assert!(html.contains("<span class=\"option-label\">B.</span>"));
        assert!(!html.contains("<b>2</b>"));
        assert!(!html.contains("question-image"));
    }

    #[test]
    fn test_image_url_escaped() {
        let question = Question {
            text: "看图".to_string(),
            image_url: Some("https://img.example.com/a.png?x=1&y=\"2\"".to_string()),
            ..Question::default()
        };

        let html = service().render_question(&question, 3);
        assert!(html.contains("src=\"https://img.example.com/a.png?x=1&amp;y=&quot;2&quot;\""));
        assert!(html.contains("第 3 题配图"));
    }
}
