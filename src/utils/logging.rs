//! 日志工具模块
//!
//! 导出过程的进度横幅，以及运行日志文件（表头 + 最终汇总）

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::QuestionPaper;
use crate::orchestrator::ProcessingStats;

const RULE_WIDTH: usize = 60;

/// 初始化日志文件，写入带时间戳的表头
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n试卷导出日志 - {}\n{}\n\n",
        "=".repeat(RULE_WIDTH),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(RULE_WIDTH)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 追加内容到日志文件
fn append_log_file(log_file_path: &str, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;
    writeln!(file, "{}", text).with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录导出配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(RULE_WIDTH));
    info!("🖨️ 试卷导出: {} → {}", config.toml_folder, config.output_folder);
    match config.typeset_command.as_deref() {
        Some(command) if config.typeset_args.is_empty() => info!("🧮 排版引擎: {}", command),
        Some(command) => info!("🧮 排版引擎: {} {}", command, config.typeset_args.join(" ")),
        None => info!("🧮 未配置排版引擎，公式以代码样式输出"),
    }
    info!(
        "📝 草稿题目: {} | 参考答案: {}",
        if config.include_drafts { "导出" } else { "跳过" },
        if config.include_answer_key { "附在文末" } else { "不附" }
    );
    info!("{}", "=".repeat(RULE_WIDTH));
}

/// 记录加载到的试卷和题目数量
pub fn log_papers_loaded(papers: &[QuestionPaper], batch_size: usize) {
    let questions: usize = papers.iter().map(|p| p.questions.len()).sum();
    info!("✓ 载入 {} 份试卷，共 {} 道题目", papers.len(), questions);
    info!("📋 每批最多同时导出 {} 份", batch_size);
}

/// 记录本批包含的试卷
pub fn log_batch_start(batch_num: usize, total_batches: usize, papers: &[QuestionPaper]) {
    info!("📦 第 {}/{} 批 ({} 份)", batch_num, total_batches, papers.len());
    for paper in papers {
        info!("   · {} ({} 题)", truncate_text(&paper.title, 30), paper.questions.len());
    }
}

/// 记录本批导出结果
pub fn log_batch_complete(batch_num: usize, batch: &ProcessingStats) {
    info!(
        "✓ 第 {} 批: 成功 {}/{}，打印 {} 题，跳过草稿 {} 题",
        batch_num, batch.success, batch.total, batch.printed, batch.skipped
    );
}

/// 最终汇总文本，同时用于终端和日志文件
pub fn format_summary(stats: &ProcessingStats) -> String {
    [
        format!("试卷: 成功 {}/{}，失败 {}", stats.success, stats.total, stats.failed),
        format!("题目: 打印 {}，跳过草稿 {}", stats.printed, stats.skipped),
    ]
    .join("\n")
}

/// 输出最终统计并追加到日志文件
pub fn print_final_stats(stats: &ProcessingStats, output_folder: &str, log_file_path: &str) {
    let summary = format_summary(stats);
    let finished_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    info!("{}", "=".repeat(RULE_WIDTH));
    info!("📊 导出结束 ({})", finished_at);
    for line in summary.lines() {
        info!("{}", line);
    }
    info!("📂 输出目录: {}", output_folder);
    info!("{}", "=".repeat(RULE_WIDTH));

    let record = format!("完成时间: {}\n{}", finished_at, summary);
    if let Err(e) = append_log_file(log_file_path, &record) {
        warn!("⚠️ 汇总未写入日志文件: {:#}", e);
    }
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abc", 5), "abc");
        assert_eq!(truncate_text("已知函数 f(x)", 4), "已知函数...");
    }

    #[test]
    fn test_init_log_file_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        init_log_file(path.to_str().unwrap()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("试卷导出日志"));
    }

    #[test]
    fn test_format_summary_includes_question_counts() {
        let stats = ProcessingStats {
            success: 2,
            failed: 1,
            total: 3,
            printed: 17,
            skipped: 4,
        };
        assert_eq!(
            format_summary(&stats),
            "试卷: 成功 2/3，失败 1\n题目: 打印 17，跳过草稿 4"
        );
    }

    #[test]
    fn test_final_stats_appended_after_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let path = path.to_str().unwrap();
        init_log_file(path).unwrap();

        let stats = ProcessingStats {
            success: 1,
            total: 1,
            printed: 5,
            ..Default::default()
        };
        print_final_stats(&stats, "out", path);

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with(&"=".repeat(RULE_WIDTH)));
        assert!(content.contains("试卷导出日志"));
        assert!(content.contains("题目: 打印 5，跳过草稿 0"));
    }
}
