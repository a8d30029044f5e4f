use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum TranslateError {
    /// 文件匹配模式没有匹配到任何文件
    #[error("没有找到匹配的文件: {pattern}")]
    NoFilesMatched { pattern: String },

    /// 文件匹配模式本身不合法
    #[error("无效的文件匹配模式 {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// 两个源文件会写到同一个输出路径
    #[error("输出文件名冲突 {file_name}: {first} 与 {second}")]
    DuplicateOutputName {
        file_name: String,
        first: String,
        second: String,
    },

    /// 不支持的文件格式
    #[error("不支持的文件格式 ({path}): {extension}")]
    UnsupportedFormat { path: String, extension: String },

    /// 翻译服务不可用（服务未启动或模型未安装）
    #[error("Ollama 不可用或模型未安装 (模型: {model}, 地址: {host})")]
    PortUnavailable { model: String, host: String },

    /// 单条翻译失败，由批量调度器就地降级处理
    #[error("翻译失败: {message}")]
    Translation { message: String },

    /// 单条翻译超时
    #[error("翻译超时 ({timeout_ms}ms)")]
    Timeout { timeout_ms: u64 },

    /// 输入文档无法解析
    #[error("无法解析文件 ({path}): {message}")]
    MalformedInput { path: String, message: String },

    /// 输出序列化失败
    #[error("序列化失败: {message}")]
    Serialize { message: String },

    /// 文件读写错误
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必填项为空
    #[error("{field} 不能为空")]
    Missing { field: &'static str },

    /// 数值超出允许范围
    #[error("{field} 的值 {value} 超出范围 {range}")]
    OutOfRange {
        field: &'static str,
        value: String,
        range: String,
    },
}

// ========== 便捷构造函数 ==========

impl TranslateError {
    /// 创建文件读写错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        TranslateError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建单条翻译失败错误
    pub fn translation(message: impl std::fmt::Display) -> Self {
        TranslateError::Translation {
            message: message.to_string(),
        }
    }

    /// 创建输入解析错误
    pub fn malformed(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        TranslateError::MalformedInput {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, TranslateError>;
