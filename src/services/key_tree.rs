//! 翻译树扁平化与重建 - 业务能力层
//!
//! - `flatten`：把嵌套的翻译树展开为有序的 (点分键, 文本) 列表
//! - `rebuild`：按点分键把 (键, 译文) 列表还原为嵌套树
//! - `count_leaves`：独立统计可翻译的字符串叶子数量
//!
//! 展开顺序即文档中的插入顺序，调度器保证响应顺序与请求一致，
//! 因此重建时可以直接按位置对应。

use serde_json::{Map, Value};

/// 展开翻译树
///
/// 深度优先遍历。只输出去除空白后非空的字符串叶子；
/// 数字、布尔、null、数组既不翻译也不参与重建。
pub fn flatten(tree: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = tree {
        collect_pairs(map, "", &mut pairs);
    }
    pairs
}

fn collect_pairs(map: &Map<String, Value>, prefix: &str, pairs: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let full_key = join_key(prefix, key);

        match value {
            Value::String(text) if !text.trim().is_empty() => {
                pairs.push((full_key, text.clone()));
            }
            Value::Object(child) => collect_pairs(child, &full_key, pairs),
            // 空白字符串、数字、布尔、null、数组：跳过
            _ => {}
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// 按点分键重建翻译树
///
/// 中间节点缺失或不是映射时会新建空映射（会覆盖同名标量）。
/// 空的路径段被跳过，最后一段为空时不赋值。
pub fn rebuild<I, K, V>(pairs: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut root = Map::new();
    for (key, value) in pairs {
        set_nested_value(&mut root, key.as_ref(), Value::String(value.into()));
    }
    Value::Object(root)
}

/// 在映射中按点分路径写入值
pub fn set_nested_value(root: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        if segment.is_empty() {
            continue;
        }

        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => return,
        };
    }

    if !last.is_empty() {
        current.insert(last.to_string(), value);
    }
}

/// 统计可翻译的字符串叶子数量，规则与 `flatten` 一致
pub fn count_leaves(tree: &Value) -> usize {
    match tree {
        Value::Object(map) => map
            .values()
            .map(|value| match value {
                Value::String(text) if !text.trim().is_empty() => 1,
                Value::Object(_) => count_leaves(value),
                _ => 0,
            })
            .sum(),
        _ => 0,
    }
}
