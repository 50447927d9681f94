/// インフラ層のエラー定義
///
/// 外部システム（ネットワーク、Dailymotion API、ファイルシステム）との
/// やり取りで発生するエラーを構造化して定義。
/// #[from] / #[source] を使って原因連鎖を保持する。
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// ネットワークエラー（DNS、接続拒否など）
    #[error("network error: {message}")]
    Network { message: String },

    /// タイムアウトエラー
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// アップロードチケットの取得失敗（ステータスが200以外）
    #[error("unable to get an upload ticket (HTTP {status})")]
    UploadTicket { status: u16 },

    /// アップロード先ホストがファイルを拒否した（ステータスが2xx以外）
    #[error("upload host {endpoint} rejected the file (HTTP {status})")]
    UploadRejected { endpoint: String, status: u16 },

    /// レスポンスに必要なフィールドがない
    #[error("response from {endpoint} is missing field '{field}'")]
    MissingField { endpoint: String, field: String },

    /// 認可コードの交換失敗（strict 版のみ）
    #[error("authorization failed (HTTP {status}): {message}")]
    Authorization { status: u16, message: String },

    /// その他のI/Oエラー
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    /// ネットワークエラーを作成
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// タイムアウトエラーを作成
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// 必須フィールド欠落エラーを作成
    pub fn missing_field(endpoint: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            endpoint: endpoint.into(),
            field: field.into(),
        }
    }

    /// I/Oエラーを作成
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// reqwest のエラーを分類して変換
    pub fn from_reqwest(error: reqwest::Error, operation: &str) -> Self {
        if error.is_timeout() {
            Self::timeout(operation)
        } else if error.is_connect() {
            Self::network(format!("Connection failed for {}: {}", operation, error))
        } else {
            Self::network(format!("Request failed for {}: {}", operation, error))
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::SystemError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            InfraError::UploadTicket { status: 404 }.to_string(),
            "unable to get an upload ticket (HTTP 404)"
        );
        assert_eq!(
            InfraError::missing_field("/file/upload", "upload_url").to_string(),
            "response from /file/upload is missing field 'upload_url'"
        );
    }

    #[test]
    fn test_severity_is_system() {
        assert_eq!(
            InfraError::timeout("GET /me").severity(),
            ErrorSeverity::SystemError
        );
    }
}
