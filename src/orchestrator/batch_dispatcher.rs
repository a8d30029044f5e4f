//! 批量翻译调度器 - 编排层
//!
//! ## 职责
//!
//! 把一组翻译请求按并发上限切分为若干批：
//!
//! 1. **分批**：连续切分，每批最多 `max_concurrent_requests` 条，最后一批可以更少
//! 2. **批内并发**：本批每条请求一个任务，等待全部结束后才开始下一批
//! 3. **失败隔离**：单条失败只记录日志，在原位置放入空占位结果，不中断批次
//! 4. **顺序保证**：输出长度等于输入长度，`output[i]` 对应 `input[i]`

use crate::models::{TranslationRequest, TranslationResponse};
use crate::services::TranslationPort;
use crate::utils::logging::{log_batch_complete, log_batch_start, truncate_text};
use futures::future::join_all;
use std::ops::Range;
use std::sync::Arc;
use tracing::error;

/// 批量调度结果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// 与请求一一对应的响应
    pub responses: Vec<TranslationResponse>,
    /// 被替换为占位结果的请求数
    pub failed: usize,
}

/// 批量翻译调度器
pub struct BatchDispatcher {
    port: Arc<dyn TranslationPort>,
    max_concurrent: usize,
}

impl BatchDispatcher {
    /// 创建调度器
    ///
    /// 并发上限的范围由 `Config::validate` 保证，这里只把 0 当作 1 处理
    pub fn new(port: Arc<dyn TranslationPort>, max_concurrent: usize) -> Self {
        Self {
            port,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// 批量翻译，只返回响应列表
    pub async fn translate_batch(&self, requests: &[TranslationRequest]) -> Vec<TranslationResponse> {
        self.dispatch(requests).await.responses
    }

    /// 批量翻译，同时返回失败计数
    pub async fn dispatch(&self, requests: &[TranslationRequest]) -> BatchOutcome {
        let groups = group_ranges(requests.len(), self.max_concurrent);
        let total_groups = groups.len();
        let mut outcome = BatchOutcome {
            responses: Vec::with_capacity(requests.len()),
            failed: 0,
        };

        for (group_idx, range) in groups.into_iter().enumerate() {
            log_batch_start(
                group_idx + 1,
                total_groups,
                range.start + 1,
                range.end,
                requests.len(),
            );

            let group_failed = self
                .run_group(&requests[range.clone()], range.start, &mut outcome.responses)
                .await;
            outcome.failed += group_failed;

            log_batch_complete(group_idx + 1, range.len() - group_failed, range.len());
        }

        outcome
    }

    /// 并发执行一批请求，按输入顺序追加结果，返回失败数量
    async fn run_group(
        &self,
        group: &[TranslationRequest],
        offset: usize,
        responses: &mut Vec<TranslationResponse>,
    ) -> usize {
        let handles: Vec<_> = group
            .iter()
            .cloned()
            .map(|request| {
                let port = Arc::clone(&self.port);
                tokio::spawn(async move { port.translate(&request).await })
            })
            .collect();

        // join_all 按句柄顺序返回，结果位置与完成顺序无关
        let mut failed = 0;
        for (idx, joined) in join_all(handles).await.into_iter().enumerate() {
            let request = &group[idx];
            let response = match joined {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    error!(
                        "[请求 {}] ❌ 翻译失败 ({} → {}) \"{}\": {}",
                        offset + idx + 1,
                        request.source_lang,
                        request.target_lang,
                        truncate_text(&request.text, 40),
                        e
                    );
                    failed += 1;
                    TranslationResponse::placeholder(self.port.model())
                }
                Err(e) => {
                    error!("[请求 {}] 任务执行失败: {}", offset + idx + 1, e);
                    failed += 1;
                    TranslationResponse::placeholder(self.port.model())
                }
            };
            responses.push(response);
        }

        failed
    }
}

/// 计算分批区间：连续切分，每批最多 `limit` 条
pub fn group_ranges(len: usize, limit: usize) -> Vec<Range<usize>> {
    let limit = limit.max(1);
    (0..len)
        .step_by(limit)
        .map(|start| start..(start + limit).min(len))
        .collect()
}
