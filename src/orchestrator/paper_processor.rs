//! 单个试卷导出器 - 编排层
//!
//! 渲染一张试卷的打印文档并写入输出目录

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::QuestionPaper;
use crate::services::PrintService;

/// 单个试卷导出统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportStats {
    /// 写入文档的题目数
    pub printed: usize,
    /// 因为是草稿而跳过的题目数
    pub skipped: usize,
    pub output_path: PathBuf,
}

/// 导出单个试卷
///
/// # 参数
/// - `print_service`: 打印服务
/// - `paper`: 试卷数据
/// - `paper_index`: 试卷索引（用于日志）
/// - `output_folder`: 输出目录
pub async fn export_paper(
    print_service: &PrintService,
    paper: &QuestionPaper,
    paper_index: usize,
    output_folder: &Path,
) -> Result<ExportStats> {
    log_paper_start(paper_index, paper);

    let printed = print_service.printable(paper).len();
    let skipped = paper.questions.len() - printed;
    if printed == 0 {
        warn!("[试卷 {}] ⚠️ 没有可打印的题目（全部为草稿）", paper_index);
    }

    // 排版引擎可能是阻塞的外部进程，放到阻塞线程池中渲染
    let service = print_service.clone();
    let paper_for_render = paper.clone();
    let document = tokio::task::spawn_blocking(move || service.render_document(&paper_for_render))
        .await
        .context("渲染任务异常退出")?;

    fs::create_dir_all(output_folder)
        .await
        .with_context(|| format!("无法创建输出目录: {}", output_folder.display()))?;

    let output_path = output_path_for(paper, paper_index, output_folder);
    fs::write(&output_path, document)
        .await
        .map_err(|e| AppError::file_write_failed(output_path.display().to_string(), e))?;

    let stats = ExportStats {
        printed,
        skipped,
        output_path,
    };
    log_paper_complete(paper_index, &stats);

    Ok(stats)
}

/// 输出文件路径：沿用 TOML 文件名，没有文件名时按索引命名
pub fn output_path_for(paper: &QuestionPaper, paper_index: usize, output_folder: &Path) -> PathBuf {
    let stem = paper
        .file_path
        .as_deref()
        .and_then(|p| Path::new(p).file_stem())
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("paper_{}", paper_index));

    output_folder.join(format!("{}.html", stem))
}

// ========== 日志辅助函数 ==========

fn log_paper_start(paper_index: usize, paper: &QuestionPaper) {
    info!("[试卷 {}] 开始导出", paper_index);
    info!("[试卷 {}] 名称: {}", paper_index, paper.title);
    info!("[试卷 {}] 题目总数: {}", paper_index, paper.questions.len());
}

fn log_paper_complete(paper_index: usize, stats: &ExportStats) {
    info!(
        "[试卷 {}] ✓ 导出完成: 打印 {} 题, 跳过草稿 {} 题 → {}",
        paper_index,
        stats.printed,
        stats.skipped,
        stats.output_path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use crate::markup::NoEngine;
    use crate::services::PrintOptions;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_write_failure_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        // 目标路径被同名目录占用
        std::fs::create_dir(dir.path().join("week1.html")).unwrap();

        let paper = QuestionPaper {
            title: "t".to_string(),
            subject: None,
            questions: Vec::new(),
            file_path: Some("papers/week1.toml".to_string()),
        };
        let service = PrintService::new(Arc::new(NoEngine), PrintOptions::default());

        let err = export_paper(&service, &paper, 1, dir.path()).await.unwrap_err();
        match err.downcast_ref::<AppError>() {
            Some(AppError::File(FileError::WriteFailed { path, .. })) => {
                assert!(path.ends_with("week1.html"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_output_path_uses_file_stem() {
        let paper = QuestionPaper {
            title: "t".to_string(),
            subject: None,
            questions: Vec::new(),
            file_path: Some("papers/week1.toml".to_string()),
        };
        assert_eq!(
            output_path_for(&paper, 1, Path::new("out")),
            Path::new("out").join("week1.html")
        );
    }

    #[test]
    fn test_output_path_falls_back_to_index() {
        let paper = QuestionPaper {
            title: "t".to_string(),
            subject: None,
            questions: Vec::new(),
            file_path: None,
        };
        assert_eq!(
            output_path_for(&paper, 7, Path::new("out")),
            Path::new("out").join("paper_7.html")
        );
    }
}
