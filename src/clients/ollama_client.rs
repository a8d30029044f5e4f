//! Ollama 翻译客户端
//!
//! ## 技术栈
//! - 使用 `async-openai` 调用 Ollama 的 OpenAI 兼容接口（`{host}/v1`）完成翻译
//! - 使用 `reqwest` 调用 Ollama 原生接口 `/api/tags` 检查模型是否已安装

use crate::config::Config;
use crate::error::{AppResult, TranslateError};
use crate::models::{TranslationRequest, TranslationResponse};
use crate::services::TranslationPort;
use crate::utils::logging::truncate_text;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

/// `/api/tags` 响应
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Ollama 翻译客户端
pub struct OllamaTranslator {
    client: Client<OpenAIConfig>,
    http: reqwest::Client,
    host: String,
    model_name: String,
    timeout: Duration,
}

impl OllamaTranslator {
    /// 创建新的 Ollama 客户端
    pub fn new(config: &Config) -> Self {
        let host = config.ollama_host.trim_end_matches('/').to_string();

        // Ollama 不校验 API key，但 OpenAI 客户端要求提供一个
        let openai_config = OpenAIConfig::new()
            .with_api_key("ollama")
            .with_api_base(format!("{}/v1", host));

        Self {
            client: Client::with_config(openai_config),
            http: reqwest::Client::new(),
            host,
            model_name: config.model.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// 发送一次聊天请求并返回原始响应文本
    async fn send_to_llm(&self, user_message: &str, system_message: &str) -> AppResult<String> {
        debug!("调用 Ollama，模型: {}", self.model_name);
        debug!("用户消息: {}", truncate_text(user_message, 80));

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(TranslateError::translation)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(TranslateError::translation)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.1)
            .top_p(0.9)
            .build()
            .map_err(TranslateError::translation)?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| TranslateError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| {
                warn!("Ollama 调用失败: {}", e);
                TranslateError::translation(e)
            })?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| TranslateError::translation("Ollama 返回内容为空"))
    }
}

#[async_trait]
impl TranslationPort for OllamaTranslator {
    async fn translate(&self, request: &TranslationRequest) -> AppResult<TranslationResponse> {
        let system_message = build_system_message(request);
        let user_message = build_user_message(request);

        let raw = self.send_to_llm(&user_message, &system_message).await?;
        let translated_text = extract_translation(&raw);

        debug!(
            "翻译完成: {} → {}",
            truncate_text(&request.text, 40),
            truncate_text(&translated_text, 40)
        );

        Ok(TranslationResponse {
            translated_text,
            source_lang: request.source_lang.clone(),
            target_lang: request.target_lang.clone(),
            model: self.model_name.clone(),
        })
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.host);

        let response = match self.http.get(&url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("无法连接到 Ollama ({}): {}", self.host, e);
                return false;
            }
        };

        match response.json::<TagsResponse>().await {
            Ok(tags) => tags.models.iter().any(|m| m.name == self.model_name),
            Err(e) => {
                error!("无法解析 Ollama 模型列表: {}", e);
                false
            }
        }
    }

    fn model(&self) -> &str {
        &self.model_name
    }
}

// ========== 提示词与响应清洗 ==========

/// 常见语言代码对应的语言名称，未知代码原样使用
pub fn language_name(code: &str) -> &str {
    match code {
        "fr" => "French",
        "en" => "English",
        "es" => "Spanish",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "nl" => "Dutch",
        other => other,
    }
}

fn build_system_message(request: &TranslationRequest) -> String {
    let source = language_name(&request.source_lang);
    let target = language_name(&request.target_lang);

    format!(
        r#"You are an expert professional translator. Translate the given text from {source} to {target}.

STRICT RULES:
- Translate into {target} only
- Return ONLY the translation, nothing else
- No explanation, no comment
- Keep variables and placeholders such as {{variable}} or {{{{variable}}}} unchanged
- Preserve the style and tone of the original"#
    )
}

fn build_user_message(request: &TranslationRequest) -> String {
    let source = language_name(&request.source_lang);
    let target = language_name(&request.target_lang);
    let context = request
        .context
        .as_deref()
        .map(|key| format!("Context (translation key): {}\n\n", key))
        .unwrap_or_default();

    format!(
        "{}Text in {}: \"{}\"\n\nTranslation in {}:",
        context, source, request.text, target
    )
}

/// 清洗模型输出
///
/// 去掉 `Translation:` / `Traduction:` 前缀和首尾引号；清洗后为空则退回原始输出
pub fn extract_translation(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if let Ok(re) = Regex::new(r"(?i)^(traduction|translation)\s*:\s*") {
        cleaned = re.replace(&cleaned, "").to_string();
    }
    if let Ok(re) = Regex::new(r#"^["']|["']$"#) {
        cleaned = re.replace_all(&cleaned, "").to_string();
    }

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        response.trim().to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_translation_strips_label_and_quotes() {
        assert_eq!(extract_translation("Translation: \"Hello\""), "Hello");
        assert_eq!(extract_translation("traduction : 'Bonjour'"), "Bonjour");
        assert_eq!(extract_translation("  Hola  "), "Hola");
    }

    #[test]
    fn test_extract_translation_falls_back_to_raw() {
        assert_eq!(extract_translation("\"\""), "\"\"");
    }

    #[test]
    fn test_extract_translation_keeps_inner_quotes() {
        assert_eq!(extract_translation("Il a dit \"oui\" hier"), "Il a dit \"oui\" hier");
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("de"), "German");
        assert_eq!(language_name("ja"), "ja");
    }

    #[test]
    fn test_user_message_includes_context() {
        let request =
            TranslationRequest::new("Accueil", "fr", "en").with_context("nav.home");
        let message = build_user_message(&request);

        assert!(message.starts_with("Context (translation key): nav.home"));
        assert!(message.contains("Text in French: \"Accueil\""));
        assert!(message.ends_with("Translation in English:"));
    }

    #[test]
    fn test_system_message_keeps_placeholder_hint() {
        let request = TranslationRequest::new("Salut {name}", "fr", "es");
        let message = build_system_message(&request);

        assert!(message.contains("from French to Spanish"));
        assert!(message.contains("{variable} or {{variable}}"));
    }

    /// 需要本地运行 Ollama：cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_ollama_translate() {
        let _ = tracing_subscriber::fmt::try_init();

        let translator = OllamaTranslator::new(&Config::from_env());
        assert!(translator.is_available().await, "Ollama 不可用");

        let request = TranslationRequest::new("Bonjour", "fr", "en");
        let response = translator.translate(&request).await.unwrap();

        println!("翻译结果: {}", response.translated_text);
        assert!(!response.translated_text.is_empty());
    }
}
