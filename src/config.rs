use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时导出的试卷数量
    pub max_concurrent_papers: usize,
    /// TOML 试卷存放目录
    pub toml_folder: String,
    /// 打印文档输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 排版引擎 ---
    /// 外部排版程序（兼容 KaTeX CLI），为空时不使用引擎
    pub typeset_command: Option<String>,
    /// 传给排版程序的额外参数
    pub typeset_args: Vec<String>,
    /// 打印文档引用的样式表
    pub stylesheet_href: Option<String>,
    // --- 打印选项 ---
    /// 打印时包含草稿题目
    pub include_drafts: bool,
    /// 打印时附加答案
    pub include_answer_key: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_papers: 8,
            toml_folder: "papers".to_string(),
            output_folder: "output_html".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            typeset_command: None,
            typeset_args: Vec::new(),
            stylesheet_href: None,
            include_drafts: false,
            include_answer_key: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_papers: std::env::var("MAX_CONCURRENT_PAPERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_papers),
            toml_folder: std::env::var("TOML_FOLDER").unwrap_or(default.toml_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            typeset_command: non_empty_var("TYPESET_COMMAND").or(default.typeset_command),
            typeset_args: std::env::var("TYPESET_ARGS").map(|v| v.split_whitespace().map(str::to_string).collect()).unwrap_or(default.typeset_args),
            stylesheet_href: non_empty_var("STYLESHEET_HREF").or(default.stylesheet_href),
            include_drafts: std::env::var("INCLUDE_DRAFTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.include_drafts),
            include_answer_key: std::env::var("INCLUDE_ANSWER_KEY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.include_answer_key),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        if self.max_concurrent_papers == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_CONCURRENT_PAPERS".to_string(),
                value: "0".to_string(),
                reason: "并发数必须大于 0".to_string(),
            }
            .into());
        }
        for (name, value) in [
            ("TOML_FOLDER", &self.toml_folder),
            ("OUTPUT_FOLDER", &self.output_folder),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: name.to_string(),
                    value: value.clone(),
                    reason: "目录不能为空".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = Config {
            max_concurrent_papers: 0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("MAX_CONCURRENT_PAPERS"));
    }

    #[test]
    fn test_empty_output_folder_rejected() {
        let config = Config {
            output_folder: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
