//! 应用入口
//!
//! 负责把配置、翻译服务和文件处理器组装在一起，并在开始前检查服务可用性

use crate::config::Config;
use crate::error::{AppResult, TranslateError};
use crate::models::{TranslationRequest, TranslationResponse, TranslationStats};
use crate::orchestrator::FileProcessor;
use crate::services::TranslationPort;
use crate::utils::logging::{log_startup, print_final_stats};
use std::sync::Arc;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    port: Arc<dyn TranslationPort>,
}

impl App {
    /// 初始化应用
    ///
    /// 校验配置并检查翻译服务，服务不可用时直接返回 `PortUnavailable`
    pub async fn initialize(config: Config, port: Arc<dyn TranslationPort>) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config);

        info!("🔌 检查 Ollama 连接...");
        if !port.is_available().await {
            return Err(TranslateError::PortUnavailable {
                model: config.model.clone(),
                host: config.ollama_host.clone(),
            });
        }
        info!("✓ Ollama 连接正常，模型: {}", port.model());

        Ok(Self { config, port })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 翻译匹配的全部文件
    pub async fn run(&self, pattern: &str, target_langs: &[String]) -> AppResult<TranslationStats> {
        let processor = FileProcessor::new(self.config.clone(), Arc::clone(&self.port));
        let stats = processor.process_files(pattern, target_langs).await?;

        print_final_stats(&stats, &self.config.output_dir);

        Ok(stats)
    }

    /// 翻译单条文本
    pub async fn translate_text(&self, text: &str, from: &str, to: &str) -> AppResult<TranslationResponse> {
        self.port
            .translate(&TranslationRequest::new(text, from, to))
            .await
    }
}
