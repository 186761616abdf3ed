//! 打印服务 - 业务能力层
//!
//! 把整张试卷渲染为可独立打开、可打印的 HTML 文档

use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::markup::{escape, TypesetEngine};
use crate::models::{Question, QuestionPaper};
use crate::services::preview_service::PreviewService;

const PRINT_STYLE: &str = r#"body { font-family: "Noto Serif SC", serif; margin: 2cm; }
.question-card { page-break-inside: avoid; margin-bottom: 1.2em; }
.question-header { font-weight: bold; }
.question-status { display: none; }
.question-image { max-width: 60%; display: block; margin: 0.5em 0; }
.question-options { list-style: none; padding-left: 1.5em; }
code { font-family: "JetBrains Mono", monospace; }
.answer-key { page-break-before: always; }"#;

/// 打印选项
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// 包含草稿题目
    pub include_drafts: bool,
    /// 文末附答案
    pub include_answer_key: bool,
    /// 额外样式表
    pub stylesheet_href: Option<String>,
}

impl From<&Config> for PrintOptions {
    fn from(config: &Config) -> Self {
        Self {
            include_drafts: config.include_drafts,
            include_answer_key: config.include_answer_key,
            stylesheet_href: config.stylesheet_href.clone(),
        }
    }
}

/// 打印服务
#[derive(Clone)]
pub struct PrintService {
    preview: PreviewService,
    options: PrintOptions,
}

impl PrintService {
    pub fn new(engine: Arc<dyn TypesetEngine>, options: PrintOptions) -> Self {
        Self {
            preview: PreviewService::new(engine),
            options,
        }
    }

    /// 本次打印包含的题目
    pub fn printable<'a>(&self, paper: &'a QuestionPaper) -> Vec<&'a Question> {
        paper
            .questions
            .iter()
            .filter(|q| self.options.include_drafts || q.is_published())
            .collect()
    }

    /// 渲染打印文档
    pub fn render_document(&self, paper: &QuestionPaper) -> String {
        self.render_document_at(paper, &Local::now())
    }

    /// 以指定生成时间渲染打印文档
    pub fn render_document_at(&self, paper: &QuestionPaper, generated_at: &DateTime<Local>) -> String {
        let questions = self.printable(paper);
        let total_marks: u32 = questions.iter().map(|q| q.marks).sum();
        debug!(
            "渲染打印文档: {} ({} / {} 题)",
            paper.title,
            questions.len(),
            paper.questions.len()
        );

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(paper.title.as_str())));
        if let Some(href) = &self.options.stylesheet_href {
            html.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                escape(href.as_str())
            ));
        }
        html.push_str(&format!("<style>\n{}\n</style>\n", PRINT_STYLE));
        html.push_str("</head>\n<body>\n");

        html.push_str("<header class=\"paper-header\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(paper.title.as_str())));
        let subject = paper
            .subject
            .as_deref()
            .map(|s| format!("科目：{} · ", escape(s)))
            .unwrap_or_default();
        html.push_str(&format!(
            "<p class=\"paper-meta\">{}共 {} 题 · 满分 {} 分 · 生成于 {}</p>\n",
            subject,
            questions.len(),
            total_marks,
            generated_at.format("%Y-%m-%d %H:%M")
        ));
        html.push_str("</header>\n<main>\n");

        for (index, question) in questions.iter().enumerate() {
            html.push_str(&self.preview.render_question(question, index + 1));
        }
        html.push_str("</main>\n");

        if self.options.include_answer_key {
            html.push_str(&self.render_answer_key(&questions));
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_answer_key(&self, questions: &[&Question]) -> String {
        let mut html = String::from("<section class=\"answer-key\">\n<h2>参考答案</h2>\n<ol>\n");
        for question in questions {
            let answer = match question.answer.as_deref() {
                Some(answer) => self.preview.render_field(answer),
                None => "—".to_string(),
            };
            html.push_str(&format!("<li>{}</li>\n", answer));
        }
        html.push_str("</ol>\n</section>\n");
        html
    }
}
