//! 批量文件翻译处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责整次运行：一组源文件 × 一组目标语言。
//!
//! ## 核心功能
//!
//! 1. **扫描文件**：按 glob 模式列出源文件，一个都没有则立即失败；
//!    不同目录下的同名文件会写到同一输出路径，同样立即失败
//! 2. **预先加载**：翻译开始前解析全部文件，格式或内容错误直接终止
//! 3. **逐对翻译**：每个 (文件, 语言) 委托给 `TranslationFlow`
//! 4. **统一保存**：全部翻译完成后再写盘，致命错误不会留下部分输出。
//!    先写到同目录下的临时文件，全部写成功后再逐个改名；中途写失败会删除已写的临时文件
//! 5. **全局统计**：文件数、键数、翻译数、失败数、语言、耗时
//!
//! ## 输出布局
//!
//! `<output_dir>/<目标语言>/<源文件名>`，每种语言每个源文件一个输出文件

use crate::config::Config;
use crate::error::{AppResult, TranslateError};
use crate::models::{
    list_files, load_all_locale_files, write_locale_file, FileFormat, LocaleFile, TranslationStats,
};
use crate::orchestrator::BatchDispatcher;
use crate::services::key_tree::count_leaves;
use crate::services::TranslationPort;
use crate::utils::logging::log_files_loaded;
use crate::workflow::{PassCtx, PassState, TranslationFlow};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 一份待写盘的译文
#[derive(Debug, Clone)]
pub struct TranslatedFile {
    pub output_path: PathBuf,
    pub format: FileFormat,
    pub tree: Value,
}

/// 批量文件翻译处理器
pub struct FileProcessor {
    config: Config,
    dispatcher: BatchDispatcher,
}

impl FileProcessor {
    /// 创建处理器，配置应已通过 `Config::validate`
    pub fn new(config: Config, port: Arc<dyn TranslationPort>) -> Self {
        let dispatcher = BatchDispatcher::new(port, config.max_concurrent_requests);
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 翻译所有匹配的文件并写盘
    pub async fn process_files(&self, pattern: &str, target_langs: &[String]) -> AppResult<TranslationStats> {
        let start_time = Instant::now();

        let paths = list_files(pattern)?;
        if paths.is_empty() {
            return Err(TranslateError::NoFilesMatched {
                pattern: pattern.to_string(),
            });
        }
        check_output_names(&paths)?;

        // 全部加载成功后才开始翻译
        let files = load_all_locale_files(&paths).await?;
        log_files_loaded(files.len(), target_langs);

        let mut stats = TranslationStats {
            total_files: files.len(),
            languages: std::iter::once(self.config.source_lang.clone())
                .chain(target_langs.iter().cloned())
                .collect(),
            ..Default::default()
        };

        let mut outputs = Vec::with_capacity(files.len() * target_langs.len());
        for (idx, file) in files.iter().enumerate() {
            let (translated, failed) = self.translate_file(file, idx + 1, target_langs).await;

            let key_count = count_leaves(&file.content);
            stats.total_keys += key_count;
            stats.translated_keys += key_count * target_langs.len();
            stats.failed_keys += failed;

            outputs.extend(translated);
        }

        self.save_translations(&outputs).await?;

        stats.duration = start_time.elapsed();
        Ok(stats)
    }

    /// 把单个文件翻译成所有目标语言，返回译文和失败数量
    async fn translate_file(
        &self,
        file: &LocaleFile,
        file_index: usize,
        target_langs: &[String],
    ) -> (Vec<TranslatedFile>, usize) {
        let flow = TranslationFlow::new(&self.dispatcher);
        let file_name = file.file_name();
        let mut translated = Vec::with_capacity(target_langs.len());
        let mut failed = 0;

        for target_lang in target_langs {
            let ctx = PassCtx::new(
                file_name.as_str(),
                file_index,
                self.config.source_lang.as_str(),
                target_lang.as_str(),
            );
            info!("{} 📝 开始翻译", ctx);

            let result = flow.run(&file.content, &ctx).await;
            failed += result.failed;

            translated.push(TranslatedFile {
                output_path: output_path(Path::new(&self.config.output_dir), target_lang, &file_name),
                format: file.format,
                tree: result.tree,
            });
        }

        (translated, failed)
    }

    /// 写出全部译文
    ///
    /// 先全部写入临时文件，任一失败则清理已写的临时文件并返回错误
    async fn save_translations(&self, outputs: &[TranslatedFile]) -> AppResult<()> {
        let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());

        for output in outputs {
            let tmp = temp_path(&output.output_path);
            if let Err(e) = write_locale_file(&tmp, output.format, &output.tree).await {
                discard_staged(&staged).await;
                return Err(e);
            }
            staged.push((tmp, output.output_path.as_path()));
        }

        for (idx, (tmp, final_path)) in staged.iter().enumerate() {
            if let Err(e) = tokio::fs::rename(tmp, final_path).await {
                discard_staged(&staged[idx..]).await;
                return Err(TranslateError::io(final_path.display().to_string(), e));
            }
            debug!("{} 状态: {}", final_path.display(), PassState::Saved);
            info!("💾 已保存: {}", final_path.display());
        }
        Ok(())
    }
}

/// 删除尚未改名的临时文件
async fn discard_staged(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(e) = tokio::fs::remove_file(tmp).await {
            warn!("无法删除临时文件 {}: {}", tmp.display(), e);
        }
    }
}

/// 检查输出文件名是否唯一
///
/// 输出只保留源文件名，不同目录下的同名文件会互相覆盖
fn check_output_names(paths: &[PathBuf]) -> AppResult<()> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if let Some(first) = seen.get(&name) {
            return Err(TranslateError::DuplicateOutputName {
                file_name: name,
                first: first.display().to_string(),
                second: path.display().to_string(),
            });
        }
        seen.insert(name, path);
    }
    Ok(())
}

/// 同目录下的临时文件路径：`.<文件名>.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{}.tmp", name))
}

/// 计算输出文件路径：`<output_dir>/<lang>/<file_name>`
pub fn output_path(output_dir: &Path, target_lang: &str, file_name: &str) -> PathBuf {
    output_dir.join(target_lang).join(file_name)
}
