use crate::error::ConfigError;

/// 并发请求数允许范围
pub const CONCURRENCY_RANGE: std::ops::RangeInclusive<usize> = 1..=10;
/// 单次翻译超时允许范围（毫秒）
pub const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 5_000..=120_000;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- Ollama 配置 ---
    pub ollama_host: String,
    pub model: String,
    // --- 语言配置 ---
    /// 源语言代码
    pub source_lang: String,
    /// 默认目标语言列表
    pub target_langs: Vec<String>,
    // --- 调度配置 ---
    /// 每组同时发出的翻译请求数量
    pub max_concurrent_requests: usize,
    /// 单次翻译超时（毫秒）
    pub timeout_ms: u64,
    // --- 目录配置 ---
    /// 输出根目录，每种语言一个子目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_host: "http://localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            source_lang: "fr".to_string(),
            target_langs: ["en", "es", "de", "it", "pt", "nl"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_concurrent_requests: 3,
            timeout_ms: 30_000,
            output_dir: "./translations/output".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            ollama_host: std::env::var("OLLAMA_HOST").unwrap_or(default.ollama_host),
            model: std::env::var("OLLAMA_MODEL").unwrap_or(default.model),
            source_lang: std::env::var("DEFAULT_SOURCE_LANG").unwrap_or(default.source_lang),
            target_langs: std::env::var("DEFAULT_TARGET_LANGS").ok().map(|v| parse_lang_list(&v)).unwrap_or(default.target_langs),
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            timeout_ms: std::env::var("TRANSLATION_TIMEOUT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.timeout_ms),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 校验配置
    ///
    /// 所有范围检查集中在这里，调度器和编排器拿到的配置都已经过校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ollama_host.trim().is_empty() {
            return Err(ConfigError::Missing { field: "OLLAMA_HOST" });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Missing { field: "OLLAMA_MODEL" });
        }
        if !CONCURRENCY_RANGE.contains(&self.max_concurrent_requests) {
            return Err(ConfigError::OutOfRange {
                field: "MAX_CONCURRENT_REQUESTS",
                value: self.max_concurrent_requests.to_string(),
                range: format!("{}..={}", CONCURRENCY_RANGE.start(), CONCURRENCY_RANGE.end()),
            });
        }
        if !TIMEOUT_RANGE_MS.contains(&self.timeout_ms) {
            return Err(ConfigError::OutOfRange {
                field: "TRANSLATION_TIMEOUT",
                value: self.timeout_ms.to_string(),
                range: format!("{}..={}ms", TIMEOUT_RANGE_MS.start(), TIMEOUT_RANGE_MS.end()),
            });
        }
        if self.target_langs.is_empty() {
            return Err(ConfigError::Missing { field: "DEFAULT_TARGET_LANGS" });
        }
        Ok(())
    }

    /// 返回校验通过的配置
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

/// 解析逗号分隔的语言列表，忽略空项
pub fn parse_lang_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|lang| lang.trim())
        .filter(|lang| !lang.is_empty())
        .map(|lang| lang.to_string())
        .collect()
}
