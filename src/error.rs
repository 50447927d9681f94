/// SDK のエラー型
///
/// ドメイン層とインフラ層のエラーを束ねる。呼び出し側は
/// `Error::Domain` / `Error::Infra` でマッチして元の型を取り出せる。
use crate::api::error::InfraError;
use crate::domain::error::DomainError;
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Domain(e) => e.severity(),
            Self::Infra(e) => e.severity(),
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Domain(e) => e.hint(),
            Self::Infra(InfraError::UploadTicket { .. }) => {
                Some("The access token may lack the 'manage_videos' scope. Try 'dailymotion login' again.")
            }
            Self::Infra(InfraError::Authorization { .. }) => {
                Some("Authorization codes are single-use and expire quickly. Start the login again.")
            }
            Self::Infra(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_passthrough() {
        let err: Error = DomainError::file_not_found("a.mp4").into();
        assert_eq!(err.severity(), ErrorSeverity::UserError);

        let err: Error = InfraError::UploadTicket { status: 403 }.into();
        assert_eq!(err.severity(), ErrorSeverity::SystemError);
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_display_is_transparent() {
        let err: Error = DomainError::unsupported_method("TRACE").into();
        assert_eq!(err.to_string(), "unsupported HTTP method: TRACE");
    }
}
