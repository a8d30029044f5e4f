//! 单文件单语言翻译流程 - 流程层
//!
//! 核心职责：定义"一个文件翻译成一种语言"的完整流程
//!
//! 流程顺序：
//! 1. 展开翻译树 → 有序的 (键, 文本)
//! 2. 每个键构建一条请求（键作为上下文）
//! 3. 交给批量调度器
//! 4. 按位置把译文对应回键，重建翻译树

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::TranslationRequest;
use crate::orchestrator::BatchDispatcher;
use crate::services::key_tree::{flatten, rebuild};
use crate::workflow::pass_ctx::{PassCtx, PassState};

/// 单次翻译的结果
#[derive(Debug, Clone)]
pub struct PassResult {
    /// 重建后的翻译树，只包含字符串叶子
    pub tree: Value,
    /// 发出的请求数
    pub requested: usize,
    /// 降级为空占位的数量
    pub failed: usize,
}

/// 翻译流程
///
/// - 不持有任何文件，不做 I/O
/// - 只依赖批量调度器
pub struct TranslationFlow<'a> {
    dispatcher: &'a BatchDispatcher,
}

impl<'a> TranslationFlow<'a> {
    /// 创建新的翻译流程
    pub fn new(dispatcher: &'a BatchDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn run(&self, source: &Value, ctx: &PassCtx) -> PassResult {
        debug!("{} 状态: {}", ctx, PassState::Loaded);

        // ========== 展开 ==========
        let pairs = flatten(source);
        debug!("{} 状态: {} ({} 个键)", ctx, PassState::Flattened, pairs.len());

        let requests: Vec<TranslationRequest> = pairs
            .iter()
            .map(|(key, text)| {
                TranslationRequest::new(text.as_str(), ctx.source_lang.as_str(), ctx.target_lang.as_str())
                    .with_context(key.as_str())
            })
            .collect();

        // ========== 调度 ==========
        info!("{} 🌐 翻译 {} 个键...", ctx, requests.len());
        let outcome = self.dispatcher.dispatch(&requests).await;
        debug!("{} 状态: {}", ctx, PassState::Dispatched);

        if outcome.failed > 0 {
            warn!("{} ⚠️ {} 个键翻译失败，已写入空字符串", ctx, outcome.failed);
        }

        // ========== 重建 ==========
        let tree = rebuild(
            pairs
                .into_iter()
                .zip(outcome.responses)
                .map(|((key, _), response)| (key, response.translated_text)),
        );
        debug!("{} 状态: {}", ctx, PassState::Rebuilt);

        PassResult {
            tree,
            requested: requests.len(),
            failed: outcome.failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockTranslator;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_run_rebuilds_translated_tree() {
        let port = Arc::new(
            MockTranslator::new()
                .with_mapping("Test App", "fr", "Application Test")
                .with_mapping("Home", "fr", "Accueil"),
        );
        let dispatcher = BatchDispatcher::new(port.clone(), 3);
        let flow = TranslationFlow::new(&dispatcher);
        let source = json!({ "app": { "title": "Test App", "version": 1 }, "nav": { "home": "Home" } });

        let result = flow.run(&source, &PassCtx::new("test.json", 1, "en", "fr")).await;

        assert_eq!(
            result.tree,
            json!({ "app": { "title": "Application Test" }, "nav": { "home": "Accueil" } })
        );
        assert_eq!(result.requested, 2);
        assert_eq!(result.failed, 0);

        let calls = port.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.source_lang == "en" && c.target_lang == "fr"));
        let contexts: Vec<Option<String>> = calls.iter().map(|c| c.context.clone()).collect();
        assert!(contexts.contains(&Some("app.title".to_string())));
        assert!(contexts.contains(&Some("nav.home".to_string())));
    }

    #[tokio::test]
    async fn test_failed_key_becomes_empty_string() {
        let port = Arc::new(MockTranslator::new().failing_on("Home"));
        let dispatcher = BatchDispatcher::new(port, 2);
        let flow = TranslationFlow::new(&dispatcher);
        let source = json!({ "title": "Title", "nav": { "home": "Home" } });

        let result = flow.run(&source, &PassCtx::new("test.json", 1, "en", "de")).await;

        assert_eq!(result.tree, json!({ "title": "Title_de", "nav": { "home": "" } }));
        assert_eq!(result.failed, 1);
    }

    #[tokio::test]
    async fn test_blank_tree_sends_nothing() {
        let port = Arc::new(MockTranslator::new());
        let dispatcher = BatchDispatcher::new(port.clone(), 2);
        let flow = TranslationFlow::new(&dispatcher);

        let result = flow
            .run(&json!({ "a": "", "b": "  " }), &PassCtx::new("t.json", 1, "en", "fr"))
            .await;

        assert_eq!(result.tree, json!({}));
        assert_eq!(result.requested, 0);
        assert!(port.calls().is_empty());
    }
}
