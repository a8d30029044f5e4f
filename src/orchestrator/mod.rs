//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `file_processor` - 批量文件翻译处理器
//! - 扫描、加载全部源文件
//! - 遍历 (文件, 目标语言)
//! - 统一写盘，汇总统计
//!
//! ### `batch_dispatcher` - 批量翻译调度器
//! - 按并发上限分批
//! - 批内并发，批间串行
//! - 单条失败降级为空占位
//!
//! ## 层次关系
//!
//! ```text
//! file_processor (处理 Vec<LocaleFile> × Vec<目标语言>)
//!     ↓
//! workflow::TranslationFlow (处理单个文件 × 单个语言)
//!     ↓
//! batch_dispatcher (处理 Vec<TranslationRequest>)
//!     ↓
//! services::TranslationPort (单条翻译能力)
//! ```

pub mod batch_dispatcher;
pub mod file_processor;

// 重新导出主要类型
pub use batch_dispatcher::{group_ranges, BatchDispatcher, BatchOutcome};
pub use file_processor::{output_path, FileProcessor, TranslatedFile};
