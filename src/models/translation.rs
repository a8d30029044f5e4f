//! 翻译请求、响应与统计数据结构

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 单条翻译请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// 待翻译文本
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    /// 上下文提示（通常是扁平化后的键），只用于提升翻译质量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// 单条翻译响应
///
/// `translated_text` 为空表示该条翻译失败后被降级为占位结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    /// 产生该结果的模型名称
    pub model: String,
}

impl TranslationResponse {
    /// 失败占位结果：文本和语言字段均为空
    pub fn placeholder(model: impl Into<String>) -> Self {
        Self {
            translated_text: String::new(),
            source_lang: String::new(),
            target_lang: String::new(),
            model: model.into(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.translated_text.is_empty()
    }
}

/// 整次运行的统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// 处理的文件数量
    pub total_files: usize,
    /// 源文件中的字符串叶子总数
    pub total_keys: usize,
    /// 翻译操作总数（叶子数 × 目标语言数）
    pub translated_keys: usize,
    /// 被降级为空占位的翻译数量
    pub failed_keys: usize,
    /// 涉及的语言（源语言 + 全部目标语言）
    pub languages: Vec<String>,
    /// 整次运行耗时
    pub duration: Duration,
}
