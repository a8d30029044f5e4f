//! # i18n Translate
//!
//! 使用本地 Ollama 模型批量翻译 JSON / YAML 翻译文件
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 持有外部连接，只暴露能力
//! - `OllamaTranslator` - 通过 Ollama 翻译单条文本，检查模型是否可用
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `TranslationPort` - 单条翻译能力接口
//! - `key_tree` - 翻译树的展开、重建与计数
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个文件翻译成一种语言"的完整流程
//! - `PassCtx` - 上下文封装（文件 + 目标语言）
//! - `TranslationFlow` - 流程编排（展开 → 调度 → 重建）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/file_processor` - 批量文件处理器，扫描、加载、保存、统计
//! - `orchestrator/batch_dispatcher` - 批量请求调度器，控制并发与失败隔离
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::OllamaTranslator;
pub use config::Config;
pub use error::{AppResult, ConfigError, TranslateError};
pub use models::{FileFormat, TranslationRequest, TranslationResponse, TranslationStats};
pub use orchestrator::{BatchDispatcher, FileProcessor};
pub use services::{count_leaves, flatten, rebuild, TranslationPort};
pub use workflow::{PassCtx, TranslationFlow};
