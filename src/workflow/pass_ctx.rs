//! 翻译处理上下文
//!
//! 封装"我正在把哪个文件翻译成哪种语言"这一信息

use std::fmt::Display;

/// 单个 (文件, 目标语言) 处理的上下文
#[derive(Debug, Clone)]
pub struct PassCtx {
    /// 源文件名（仅用于日志显示）
    pub file_name: String,

    /// 文件序号（从1开始，仅用于日志显示）
    pub file_index: usize,

    pub source_lang: String,

    pub target_lang: String,
}

impl PassCtx {
    /// 创建新的处理上下文
    pub fn new(
        file_name: impl Into<String>,
        file_index: usize,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_index,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

impl Display for PassCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文件 #{} {} {}→{}]",
            self.file_index, self.file_name, self.source_lang, self.target_lang
        )
    }
}

/// 单个 (文件, 目标语言) 处理的状态，严格按顺序推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PassState {
    Loaded,
    Flattened,
    Dispatched,
    Rebuilt,
    Saved,
}

impl Display for PassState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PassState::Loaded => "已加载",
            PassState::Flattened => "已展开",
            PassState::Dispatched => "已翻译",
            PassState::Rebuilt => "已重建",
            PassState::Saved => "已保存",
        };
        write!(f, "{}", name)
    }
}
