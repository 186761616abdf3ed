//! 批量试卷导出器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量导出和资源管理。
//!
//! 1. **应用初始化**：写日志文件表头、选择排版引擎
//! 2. **批量加载**：扫描并加载所有试卷（`Vec<QuestionPaper>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：每批完成后再开始下一批
//! 5. **全局统计**：汇总所有试卷的导出结果

use anyhow::Result;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure;
use crate::models::QuestionPaper;
use crate::orchestrator::paper_processor::{self, ExportStats};
use crate::services::{PrintOptions, PrintService};
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_papers_loaded, log_startup,
    print_final_stats,
};

/// 应用主结构
pub struct App {
    config: Config,
    print_service: PrintService,
}

/// 导出统计（整次运行或单个批次）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    /// 成功导出的试卷中打印的题目数
    pub printed: usize,
    /// 成功导出的试卷中跳过的草稿数
    pub skipped: usize,
}

impl ProcessingStats {
    fn record_export(&mut self, export: &ExportStats) {
        self.success += 1;
        self.printed += export.printed;
        self.skipped += export.skipped;
    }

    fn record_failure(&mut self) {
        self.failed += 1;
    }

    fn merge(&mut self, batch: &ProcessingStats) {
        self.success += batch.success;
        self.failed += batch.failed;
        self.printed += batch.printed;
        self.skipped += batch.skipped;
    }
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        init_log_file(&config.output_log_file)?;
        log_startup(&config);

        let engine = infrastructure::engine_from_config(&config);
        if config.typeset_command.is_some() && !engine.is_available() {
            warn!("⚠️ 排版程序当前不可用，公式将以代码样式输出");
        }

        let print_service = PrintService::new(engine, PrintOptions::from(&config));

        Ok(Self {
            config,
            print_service,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let all_papers = self.load_papers().await?;

        if all_papers.is_empty() {
            warn!("⚠️ 没有找到待导出的TOML文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_papers_loaded(&all_papers, self.config.max_concurrent_papers);

        let stats = self.process_all_papers(all_papers).await?;

        print_final_stats(
            &stats,
            &self.config.output_folder,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 加载试卷
    async fn load_papers(&self) -> Result<Vec<QuestionPaper>> {
        info!("\n📁 正在扫描待导出的试卷...");
        Ok(crate::models::load_all_papers(&self.config.toml_folder).await?)
    }

    /// 导出所有试卷
    async fn process_all_papers(&self, all_papers: Vec<QuestionPaper>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_papers;
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_papers = all_papers.len();
        let mut stats = ProcessingStats {
            total: total_papers,
            ..Default::default()
        };

        let total_batches = total_papers.div_ceil(batch_size);
        for (batch_idx, batch_papers) in all_papers.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            log_batch_start(batch_idx + 1, total_batches, batch_papers);

            let batch_stats = self
                .process_batch(batch_papers, batch_start, semaphore.clone())
                .await?;

            stats.merge(&batch_stats);
            log_batch_complete(batch_idx + 1, &batch_stats);
        }

        Ok(stats)
    }

    /// 导出单个批次
    async fn process_batch(
        &self,
        batch_papers: &[QuestionPaper],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<ProcessingStats> {
        let mut batch_handles = Vec::new();
        let output_folder = PathBuf::from(&self.config.output_folder);

        for (idx, paper) in batch_papers.iter().enumerate() {
            let paper_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let print_service = self.print_service.clone();
            let paper = paper.clone();
            let output_folder = output_folder.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                paper_processor::export_paper(&print_service, &paper, paper_index, &output_folder)
                    .await
                    .inspect_err(|e| {
                        error!("[试卷 {}] ❌ 导出过程中发生错误: {:#}", paper_index, e)
                    })
            });
            batch_handles.push(handle);
        }

        // 等待本批所有任务完成
        let mut batch_stats = ProcessingStats {
            total: batch_papers.len(),
            ..Default::default()
        };
        for outcome in join_all(batch_handles).await {
            match outcome {
                Ok(Ok(export)) => batch_stats.record_export(&export),
                Ok(Err(_)) => batch_stats.record_failure(),
                Err(e) => {
                    error!("导出任务执行失败: {}", e);
                    batch_stats.record_failure();
                }
            }
        }

        Ok(batch_stats)
    }
}
