use i18n_translate::services::MockTranslator;
use i18n_translate::{Config, FileProcessor, TranslateError, TranslationPort};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn langs(list: &[&str]) -> Vec<String> {
    list.iter().map(|l| l.to_string()).collect()
}

fn test_config(output_dir: &Path) -> Config {
    Config {
        source_lang: "en".to_string(),
        max_concurrent_requests: 2,
        output_dir: output_dir.display().to_string(),
        ..Config::default()
    }
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("输出文件应存在");
    serde_json::from_str(&text).expect("输出文件应为合法 JSON")
}

#[tokio::test]
async fn test_translate_json_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(
        input.path().join("test.json"),
        r#"{"app": {"title": "Test App"}, "nav": {"home": "Home"}}"#,
    )
    .unwrap();

    let port = Arc::new(
        MockTranslator::new()
            .with_mapping("Test App", "fr", "Application Test")
            .with_mapping("Home", "fr", "Accueil"),
    );
    let processor = FileProcessor::new(test_config(output.path()), port);

    let pattern = format!("{}/*.json", input.path().display());
    let stats = processor.process_files(&pattern, &langs(&["fr"])).await.unwrap();

    assert_eq!(stats.total_files, 1);
    assert_eq!(stats.total_keys, 2);
    assert_eq!(stats.translated_keys, 2);
    assert_eq!(stats.failed_keys, 0);
    assert_eq!(stats.languages, langs(&["en", "fr"]));

    assert_eq!(
        read_json(&output.path().join("fr").join("test.json")),
        json!({ "app": { "title": "Application Test" }, "nav": { "home": "Accueil" } })
    );
}

#[tokio::test]
async fn test_translate_yaml_file_multiple_languages() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(
        input.path().join("messages.yml"),
        "message: Hello\ncount: 3\nitems:\n  - one\n",
    )
    .unwrap();

    let port = Arc::new(
        MockTranslator::new()
            .with_mapping("Hello", "fr", "Bonjour")
            .with_mapping("Hello", "es", "Hola"),
    );
    let processor = FileProcessor::new(test_config(output.path()), port);

    let pattern = format!("{}/*.yml", input.path().display());
    let stats = processor
        .process_files(&pattern, &langs(&["fr", "es"]))
        .await
        .unwrap();

    assert_eq!(stats.total_keys, 1);
    assert_eq!(stats.translated_keys, 2);
    assert_eq!(stats.languages, langs(&["en", "fr", "es"]));

    let fr: Value =
        serde_yaml::from_str(&std::fs::read_to_string(output.path().join("fr/messages.yml")).unwrap())
            .unwrap();
    let es: Value =
        serde_yaml::from_str(&std::fs::read_to_string(output.path().join("es/messages.yml")).unwrap())
            .unwrap();

    // 非字符串叶子不会出现在译文中
    assert_eq!(fr, json!({ "message": "Bonjour" }));
    assert_eq!(es, json!({ "message": "Hola" }));
}

#[tokio::test]
async fn test_partial_failure_keeps_other_keys() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(
        input.path().join("ui.json"),
        r#"{"ok": "Save", "broken": "Cancel", "nested": {"ok": "Open"}}"#,
    )
    .unwrap();

    let port = Arc::new(MockTranslator::new().failing_on("Cancel"));
    let processor = FileProcessor::new(test_config(output.path()), port);

    let pattern = format!("{}/*.json", input.path().display());
    let stats = processor.process_files(&pattern, &langs(&["de"])).await.unwrap();

    assert_eq!(stats.failed_keys, 1);
    assert_eq!(
        read_json(&output.path().join("de").join("ui.json")),
        json!({ "ok": "Save_de", "broken": "", "nested": { "ok": "Open_de" } })
    );
}

#[tokio::test]
async fn test_no_files_matched() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let processor = FileProcessor::new(test_config(output.path()), Arc::new(MockTranslator::new()));

    let pattern = format!("{}/*.json", input.path().display());
    let result = processor.process_files(&pattern, &langs(&["fr"])).await;

    match result {
        Err(TranslateError::NoFilesMatched { pattern: p }) => assert_eq!(p, pattern),
        other => panic!("期望 NoFilesMatched，实际: {:?}", other),
    }
}

#[tokio::test]
async fn test_unsupported_format_fails_before_translation() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(input.path().join("a.json"), r#"{"x": "Hello"}"#).unwrap();
    std::fs::write(input.path().join("b.txt"), "some content").unwrap();

    let port = Arc::new(MockTranslator::new());
    let processor = FileProcessor::new(test_config(output.path()), port.clone());

    let pattern = format!("{}/*", input.path().display());
    let result = processor.process_files(&pattern, &langs(&["fr"])).await;

    assert!(matches!(result, Err(TranslateError::UnsupportedFormat { .. })));
    assert!(port.calls().is_empty(), "不应发出任何翻译请求");
    assert!(!output.path().join("fr").exists(), "不应留下部分输出");
}

#[tokio::test]
async fn test_malformed_json_is_fatal() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(input.path().join("bad.json"), "invalid json {").unwrap();

    let port = Arc::new(MockTranslator::new());
    let processor = FileProcessor::new(test_config(output.path()), port.clone());

    let pattern = format!("{}/*.json", input.path().display());
    let result = processor.process_files(&pattern, &langs(&["fr"])).await;

    assert!(matches!(result, Err(TranslateError::MalformedInput { .. })));
    assert!(port.calls().is_empty());
}

#[tokio::test]
async fn test_requests_carry_key_context_and_languages() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(input.path().join("c.json"), r#"{"menu": {"file": "File"}}"#).unwrap();

    let port = Arc::new(MockTranslator::new());
    let processor = FileProcessor::new(test_config(output.path()), port.clone());

    let pattern = format!("{}/*.json", input.path().display());
    processor.process_files(&pattern, &langs(&["it"])).await.unwrap();

    let calls = port.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "File");
    assert_eq!(calls[0].source_lang, "en");
    assert_eq!(calls[0].target_lang, "it");
    assert_eq!(calls[0].context.as_deref(), Some("menu.file"));
    assert_eq!(port.model(), "mock");
}

#[tokio::test]
async fn test_same_file_name_in_two_directories_is_rejected() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for dir in ["admin", "shop"] {
        std::fs::create_dir(input.path().join(dir)).unwrap();
        std::fs::write(input.path().join(dir).join("common.json"), r#"{"x": "Hello"}"#).unwrap();
    }

    let port = Arc::new(MockTranslator::new());
    let processor = FileProcessor::new(test_config(output.path()), port.clone());

    let pattern = format!("{}/*/common.json", input.path().display());
    let result = processor.process_files(&pattern, &langs(&["fr"])).await;

    match result {
        Err(TranslateError::DuplicateOutputName { file_name, .. }) => {
            assert_eq!(file_name, "common.json")
        }
        other => panic!("期望 DuplicateOutputName，实际: {:?}", other),
    }
    assert!(port.calls().is_empty(), "不应发出任何翻译请求");
    assert!(!output.path().join("fr").exists());
}

#[tokio::test]
async fn test_write_failure_leaves_no_partial_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(input.path().join("test.json"), r#"{"x": "Hello"}"#).unwrap();
    // es 目录位置被普通文件占用，写 es 译文时失败
    std::fs::write(output.path().join("es"), "").unwrap();

    let port = Arc::new(MockTranslator::new());
    let processor = FileProcessor::new(test_config(output.path()), port.clone());

    let pattern = format!("{}/*.json", input.path().display());
    let result = processor.process_files(&pattern, &langs(&["fr", "es"])).await;

    assert!(matches!(result, Err(TranslateError::Io { .. })));
    assert_eq!(port.calls().len(), 2);
    assert!(!output.path().join("fr").join("test.json").exists(), "不应留下部分输出");
    assert!(!output.path().join("fr").join(".test.json.tmp").exists(), "临时文件应被清理");
}
