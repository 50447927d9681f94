/// HTTPレスポンスの正規化
///
/// トランスポートが返す「ヘッダーブロック + ボディ」の連結バイト列を分割し、
/// ヘッダーをマップに、ボディをJSONに変換する。
/// ステータスコードの解釈は行わない（呼び出し側の責務）。
use crate::api::transport::RawResponse;
use serde_json::Value;
use std::collections::BTreeMap;

/// 正規化済みレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// JSONボディ。空または不正なJSONの場合は Value::Null
    pub body: Value,
    pub status: u16,
    /// ヘッダー名ごとに値は1つ（重複時は後勝ち）
    pub headers: BTreeMap<String, String>,
}

impl HttpResponse {
    /// 生レスポンスを報告されたヘッダー長で分割して正規化する
    pub fn from_raw(raw: RawResponse) -> Self {
        let (head, body) = raw.split();
        Self {
            body: decode_body(body),
            status: raw.status,
            headers: parse_headers(&String::from_utf8_lossy(head)),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// ヘッダーを大文字小文字を区別せずに取得
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// ボディのトップレベル文字列フィールドを取得
    pub fn body_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }
}

/// ヘッダーブロックをマップに変換
///
/// ステータス行は捨て、各行を最初のコロンで名前と値に分割してトリムする。
/// コロンのない行は値を空文字列とする。
pub fn parse_headers(block: &str) -> BTreeMap<String, String> {
    block
        .trim()
        .lines()
        .map(str::trim)
        // 空行とステータス行（リダイレクトや 100 Continue で複数になり得る）は捨てる
        .filter(|line| !line.is_empty() && !line.starts_with("HTTP/"))
        .map(|line| match line.split_once(':') {
            Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

/// ボディをJSONとしてデコード
///
/// 失敗しても例外にせず Value::Null に落とす。
pub fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}
