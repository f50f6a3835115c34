//! HTTPレスポンスの解釈
//!
//! ブラウザ(fetch)とCLI(reqwest)はどちらもレスポンスを`RawResponse`に
//! 読み切ってからここに渡す。ステータス判定・JSONパース・形の検証は
//! すべてここで行い、呼び出し側はUI状態に反映するだけにする。

use serde_json::Value;

use crate::error::{Error, PatchField, Result};
use crate::lenient;
use crate::types::{AnalyticsSummary, Candidate, CandidatePage, UploadResult};

/// 読み切ったレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|_| Error::NonJson {
            status: self.status,
            status_text: self.status_text.clone(),
            body: self.body.clone(),
        })
    }

    fn http_error(&self) -> Error {
        Error::Http {
            status: self.status,
            status_text: self.status_text.clone(),
            body: self.body.clone(),
        }
    }

    /// アップロード応答
    ///
    /// 1. JSONとして読めなければ `NonJson`
    /// 2. 2xx以外ならペイロードを整形して `Rejected`
    /// 3. それ以外は結果として返す
    pub fn into_upload(self) -> Result<UploadResult> {
        let payload = self.json()?;
        if !self.is_success() {
            let payload = match payload {
                Value::String(s) => s,
                other => serde_json::to_string_pretty(&other)?,
            };
            return Err(Error::Rejected {
                status: self.status,
                status_text: self.status_text,
                payload,
            });
        }
        Ok(UploadResult(payload))
    }

    /// 候補者一覧応答
    ///
    /// 2xx以外は`Http`エラー。2xxでも形が想定外なら空一覧＋警告にする。
    pub fn into_listing(self) -> Result<Listing> {
        if !self.is_success() {
            return Err(self.http_error());
        }
        Ok(match serde_json::from_str::<Value>(&self.body) {
            Ok(value) => Listing::from_value(value),
            Err(e) => Listing::fallback(format!("candidates response is not JSON: {}", e)),
        })
    }

    /// PATCH応答（本文は見ない）
    pub fn into_ack(self, field: PatchField) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error::PatchFailed {
                field,
                status: self.status,
                body: self.body,
            })
        }
    }

    /// 集計応答
    pub fn into_summary(self) -> Result<AnalyticsSummary> {
        if !self.is_success() {
            return Err(self.http_error());
        }
        let value = self.json()?;
        Ok(serde_json::from_value(value)?)
    }

    /// 任意JSON応答（候補者詳細・ヘルスチェック）
    pub fn into_json(self) -> Result<Value> {
        if !self.is_success() {
            return Err(self.http_error());
        }
        self.json()
    }
}

/// 一覧の取得結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub page: CandidatePage,
    /// 形が想定外だった場合の警告（ログ用、ユーザーには出さない）
    pub warnings: Vec<String>,
}

impl Listing {
    fn fallback(warning: String) -> Self {
        Self {
            page: CandidatePage::default(),
            warnings: vec![warning],
        }
    }

    pub fn from_value(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Self::fallback(format!("unexpected /candidates response shape: {}", other))
            }
        };

        let Some(Value::Array(items)) = map.remove("candidates") else {
            return Self::fallback(format!(
                "unexpected /candidates response shape: {}",
                Value::Object(map)
            ));
        };

        let mut warnings = Vec::new();
        let mut candidates = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match Candidate::from_value(item) {
                Some(candidate) => candidates.push(candidate),
                None => warnings.push(format!("skipped non-object candidate entry at index {}", index)),
            }
        }

        let total = map
            .get("total")
            .and_then(lenient::id_from_value)
            .unwrap_or(candidates.len() as u64);
        let limit = map.get("limit").and_then(lenient::id_from_value);
        let offset = map
            .get("offset")
            .and_then(lenient::id_from_value)
            .unwrap_or_default();

        Self {
            page: CandidatePage {
                total,
                limit,
                offset,
                candidates,
            },
            warnings,
        }
    }
}
