//! 翻译能力接口 - 业务能力层
//!
//! 批量调度器和编排层只依赖这个 trait，不关心背后是 Ollama 还是测试替身。

use crate::error::AppResult;
use crate::models::{TranslationRequest, TranslationResponse};
use async_trait::async_trait;

/// 单条文本翻译能力
///
/// 实现必须支持并发调用（最多为配置的并发数）
#[async_trait]
pub trait TranslationPort: Send + Sync {
    /// 翻译一条文本
    async fn translate(&self, request: &TranslationRequest) -> AppResult<TranslationResponse>;

    /// 检查服务是否可用（只在启动时调用一次）
    async fn is_available(&self) -> bool;

    /// 使用的模型名称
    fn model(&self) -> &str;
}
