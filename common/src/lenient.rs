//! 緩いデシリアライズ
//!
//! バックエンドのJSONは型が揺れる（数値が文字列で来る、リストが区切り文字列で来る等）。
//! ここの関数は`serde_json::Value`として一旦受けてから変換し、失敗しても
//! レコード全体を落とさず「値なし」に倒す。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{CandidateStatus, Score, TextOrList};

/// 任意のJSON値を受け取る（エラーにしない）
fn any<'de, D: Deserializer<'de>>(d: D) -> Result<Value, D::Error> {
    Value::deserialize(d)
}

/// 数値・数字文字列 → 非負整数。0は「未設定」扱いにしない（呼び出し側で判定）
pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(id_from_value(&any(d)?))
}

pub fn id_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 文字列・数値・真偽値 → 文字列。空文字列は値なし
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(text_from_value(&any(d)?))
}

pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `text`と同じだが値なしは空文字列
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(text_from_value(&any(d)?).unwrap_or_default())
}

/// 数値または文字列のスコア
pub fn score<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Score>, D::Error> {
    Ok(match any(d)? {
        Value::Number(n) => n.as_f64().map(Score::Number),
        Value::String(s) if !s.trim().is_empty() => Some(Score::Text(s)),
        _ => None,
    })
}

/// 区切り文字列または文字列リスト
pub fn text_or_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TextOrList>, D::Error> {
    Ok(match any(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(TextOrList::Text(s)),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().filter_map(text_from_value).collect();
            if items.is_empty() {
                None
            } else {
                Some(TextOrList::List(items))
            }
        }
        _ => None,
    })
}

pub fn status<'de, D: Deserializer<'de>>(d: D) -> Result<CandidateStatus, D::Error> {
    Ok(text_from_value(&any(d)?)
        .map(|s| CandidateStatus::parse(&s))
        .unwrap_or_default())
}

/// 数値または数字文字列 → f64（読めなければ0）
pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number_from_value(&any(d)?).unwrap_or_default())
}

pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 件数（非負整数、読めなければ0）
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(id_from_value(&any(d)?).unwrap_or_default())
}

/// リストであれば要素ごとに変換、リスト以外は空
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match any(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// 文字列キー → 件数のマップ。件数が読めないエントリは捨てる
pub fn count_map<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<std::collections::BTreeMap<String, u64>, D::Error> {
    Ok(match any(d)? {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| id_from_value(v).map(|n| (k.clone(), n)))
            .collect(),
        _ => Default::default(),
    })
}
