use crate::error::{AppError, AppResult, FileError};
use crate::models::question::QuestionPaper;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载试卷
pub async fn load_paper(toml_file_path: &Path) -> AppResult<QuestionPaper> {
    let path_text = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_text, e))?;

    let paper: QuestionPaper =
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_text, e))?;

    Ok(paper.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 加载文件夹中所有 TOML 试卷
///
/// 解析失败的文件会被跳过并记录警告；结果按文件名排序。
pub async fn load_all_papers(folder_path: &str) -> AppResult<Vec<QuestionPaper>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut papers = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_paper(&path).await {
            Ok(paper) => {
                tracing::info!("成功加载 {} 个题目", paper.questions.len());
                papers.push(paper);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(papers)
}
