//! 测试用翻译器
//!
//! 不访问网络，结果确定，可以模拟失败、延迟，并记录调用情况。

use crate::error::{AppResult, TranslateError};
use crate::models::{TranslationRequest, TranslationResponse};
use crate::services::translation_port::TranslationPort;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 测试用翻译器
///
/// 默认把文本翻译为 `"{text}_{target_lang}"`
#[derive(Debug, Default)]
pub struct MockTranslator {
    /// (原文, 目标语言) → 译文
    mappings: HashMap<(String, String), String>,
    /// 这些原文的翻译会失败
    failing_texts: HashSet<String>,
    /// 按原文指定的延迟，用于打乱完成顺序
    delays: HashMap<String, Duration>,
    available: bool,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    calls: Mutex<Vec<TranslationRequest>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    pub fn with_mapping(
        mut self,
        text: impl Into<String>,
        target_lang: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.mappings
            .insert((text.into(), target_lang.into()), translated.into());
        self
    }

    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.failing_texts.insert(text.into());
        self
    }

    pub fn with_delay(mut self, text: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(text.into(), delay);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// 已收到的全部请求
    pub fn calls(&self) -> Vec<TranslationRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// 同时进行中的请求数峰值
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationPort for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> AppResult<TranslationResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self
            .delays
            .get(&request.text)
            .copied()
            .unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_texts.contains(&request.text) {
            return Err(TranslateError::translation(format!(
                "模拟失败: {}",
                request.text
            )));
        }

        let translated_text = self
            .mappings
            .get(&(request.text.clone(), request.target_lang.clone()))
            .cloned()
            .unwrap_or_else(|| format!("{}_{}", request.text, request.target_lang));

        Ok(TranslationResponse {
            translated_text,
            source_lang: request.source_lang.clone(),
            target_lang: request.target_lang.clone(),
            model: self.model().to_string(),
        })
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    fn model(&self) -> &str {
        "mock"
    }
}
