/// ドメイン層のエラー定義
///
/// ネットワークに出る前に検出できる制約違反を構造化して定義。
/// 外部クレートのエラーは含まない。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Client ID / Client Secret / Redirect URI のいずれかが未設定
    #[error("incomplete client credentials: {message}")]
    IncompleteCredentials { message: String },

    /// ファイルが見つからない
    #[error("unable to locate file to upload: {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// GET/POST/PATCH/PUT/DELETE 以外のHTTPメソッド
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },
}

impl DomainError {
    /// 認証情報不足エラーを生成
    pub fn incomplete_credentials(message: impl Into<String>) -> Self {
        Self::IncompleteCredentials {
            message: message.into(),
        }
    }

    /// ファイルが見つからないエラーを生成
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// ディレクトリ指定エラーを生成
    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// 未対応メソッドエラーを生成
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// エラーの深刻度を返す
    ///
    /// 終了コードの決定に使用できる
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IncompleteCredentials { .. } => ErrorSeverity::ConfigError,
            Self::FileNotFound { .. } => ErrorSeverity::UserError,
            Self::NotAFile { .. } => ErrorSeverity::UserError,
            Self::UnsupportedMethod { .. } => ErrorSeverity::UserError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::IncompleteCredentials { .. } => Some(
                "Run 'dailymotion configure' to set the Client ID, Client Secret and Redirect URI.",
            ),
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::UnsupportedMethod { .. } => {
                Some("Supported methods: GET, POST, PATCH, PUT, DELETE")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_is_config_severity() {
        let err = DomainError::incomplete_credentials("missing client id");
        assert_eq!(err.severity(), ErrorSeverity::ConfigError);
        assert!(err.to_string().contains("missing client id"));
    }

    #[test]
    fn test_file_errors_are_user_severity() {
        assert_eq!(
            DomainError::file_not_found("a.mp4").severity(),
            ErrorSeverity::UserError
        );
        assert_eq!(
            DomainError::not_a_file("/tmp").severity(),
            ErrorSeverity::UserError
        );
        assert!(DomainError::file_not_found("a.mp4").hint().is_some());
    }
}
