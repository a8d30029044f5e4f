//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use crate::config::Config;
use crate::models::TranslationStats;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量翻译模式");
    info!("🤖 模型: {} @ {}", config.model, config.ollama_host);
    info!("📊 最大并发数: {}", config.max_concurrent_requests);
    info!("📁 输出目录: {}", config.output_dir);
    info!("{}", "=".repeat(60));
}

/// 记录文件加载信息
///
/// # 参数
/// - `total`: 文件总数
/// - `target_langs`: 目标语言
pub fn log_files_loaded(total: usize, target_langs: &[String]) {
    info!("✓ 找到 {} 个待翻译的文件", total);
    info!("🌐 目标语言: {}", target_langs.join(", "));
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始请求编号
/// - `end`: 结束请求编号
/// - `total`: 请求总数
pub fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    debug!(
        "📦 开始处理第 {}/{} 批 | 请求 {}-{} / 共 {} 条",
        batch_num, total_batches, start, end, total
    );
}

/// 记录批次完成信息
pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    debug!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, success, total);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &TranslationStats, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 翻译完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 文件数: {}", stats.total_files);
    info!("🔑 源键数: {}", stats.total_keys);
    info!("✅ 翻译数: {}", stats.translated_keys);
    info!("❌ 失败数: {}", stats.failed_keys);
    info!("🌐 语言: {}", stats.languages.join(", "));
    info!("⏱️ 耗时: {}s", stats.duration.as_secs());
    info!("{}", "=".repeat(60));
    info!("\n文件已保存至: {}", output_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
