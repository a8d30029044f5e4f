//! 翻译文件格式（JSON / YAML）的识别、解析与序列化

use crate::error::{AppResult, TranslateError};
use serde_json::Value;
use std::path::Path;

/// 支持的翻译文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// 根据文件扩展名识别格式（不区分大小写）
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            _ => Err(TranslateError::UnsupportedFormat {
                path: path.display().to_string(),
                extension: if extension.is_empty() {
                    "(无扩展名)".to_string()
                } else {
                    format!(".{}", extension)
                },
            }),
        }
    }

    /// 解析文本为翻译树，根节点必须是映射
    pub fn parse(self, text: &str, path: &Path) -> AppResult<Value> {
        let tree: Value = match self {
            FileFormat::Json => serde_json::from_str(text)
                .map_err(|e| TranslateError::malformed(path.display().to_string(), e))?,
            FileFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| TranslateError::malformed(path.display().to_string(), e))?,
        };

        if !tree.is_object() {
            return Err(TranslateError::malformed(
                path.display().to_string(),
                "根节点必须是键值映射",
            ));
        }

        Ok(tree)
    }

    /// 将翻译树序列化为文本
    pub fn serialize(self, tree: &Value) -> AppResult<String> {
        match self {
            FileFormat::Json => serde_json::to_string_pretty(tree).map_err(|e| {
                TranslateError::Serialize {
                    message: e.to_string(),
                }
            }),
            FileFormat::Yaml => serde_yaml::to_string(tree).map_err(|e| {
                TranslateError::Serialize {
                    message: e.to_string(),
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_format() {
        assert_eq!(FileFormat::from_path(Path::new("a/fr.json")).unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("fr.YAML")).unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("fr.yml")).unwrap(), FileFormat::Yaml);
    }

    #[test]
    fn test_unsupported_format() {
        match FileFormat::from_path(Path::new("test.txt")) {
            Err(TranslateError::UnsupportedFormat { extension, .. }) => {
                assert_eq!(extension, ".txt")
            }
            other => panic!("期望 UnsupportedFormat，实际: {:?}", other),
        }
        assert!(FileFormat::from_path(Path::new("Makefile")).is_err());
    }

    #[test]
    fn test_parse_yaml_keeps_order() {
        let text = "message: Hello\napp:\n  name: Test\n  count: 3\n";
        let tree = FileFormat::Yaml.parse(text, Path::new("test.yaml")).unwrap();

        assert_eq!(tree["message"], "Hello");
        assert_eq!(tree["app"]["name"], "Test");
        assert_eq!(tree["app"]["count"], 3);
        let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["message", "app"]);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = FileFormat::Json.parse("invalid json {", Path::new("test.json"));
        assert!(matches!(result, Err(TranslateError::MalformedInput { .. })));
    }

    #[test]
    fn test_parse_rejects_non_mapping_root() {
        let result = FileFormat::Json.parse("[1, 2]", Path::new("test.json"));
        assert!(matches!(result, Err(TranslateError::MalformedInput { .. })));
    }

    #[test]
    fn test_serialize_json_pretty() {
        let tree = json!({ "app": { "title": "Titre" } });
        let text = FileFormat::Json.serialize(&tree).unwrap();
        assert_eq!(text, "{\n  \"app\": {\n    \"title\": \"Titre\"\n  }\n}");
    }

    #[test]
    fn test_serialize_yaml_parses_back() {
        let tree = json!({ "nav": { "home": "Accueil" } });
        let text = FileFormat::Yaml.serialize(&tree).unwrap();
        let parsed = FileFormat::Yaml.parse(&text, Path::new("out.yaml")).unwrap();
        assert_eq!(parsed, tree);
    }
}
