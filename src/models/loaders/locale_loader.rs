use crate::error::{AppResult, TranslateError};
use crate::models::format::FileFormat;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 已加载的源翻译文件
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub path: PathBuf,
    pub format: FileFormat,
    /// 解析后的翻译树
    pub content: Value,
}

impl LocaleFile {
    /// 文件名（含扩展名），用作输出文件名
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// 按 glob 模式列出文件，结果按路径排序
pub fn list_files(pattern: &str) -> AppResult<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| TranslateError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("无法访问路径 {}: {}", e.path().display(), e),
        }
    }
    files.sort();

    Ok(files)
}

/// 读取并解析单个翻译文件
///
/// 先识别格式再读取，不支持的扩展名不会触发任何 I/O
pub async fn load_locale_file(path: &Path) -> AppResult<LocaleFile> {
    let format = FileFormat::from_path(path)?;

    let text = fs::read_to_string(path)
        .await
        .map_err(|e| TranslateError::io(path.display().to_string(), e))?;

    let content = format.parse(&text, path)?;

    Ok(LocaleFile {
        path: path.to_path_buf(),
        format,
        content,
    })
}

/// 加载全部文件，任一失败则整体失败
pub async fn load_all_locale_files(paths: &[PathBuf]) -> AppResult<Vec<LocaleFile>> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        let file = load_locale_file(path).await?;
        files.push(file);
    }

    Ok(files)
}

/// 序列化翻译树并写入文件，自动创建父目录
pub async fn write_locale_file(path: &Path, format: FileFormat, tree: &Value) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| TranslateError::io(parent.display().to_string(), e))?;
    }

    let text = format.serialize(tree)?;
    fs::write(path, text)
        .await
        .map_err(|e| TranslateError::io(path.display().to_string(), e))?;

    Ok(())
}
