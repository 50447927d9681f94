//! エラー深刻度
//!
//! SDK の各層（domain, api, config）が共有する最も抽象的なエラー分類。
//! バイナリ側はこれを使って終了コードを決定する。
//!
//! **依存方向の原則:**
//! - 内側層（domain, api, config）はこのモジュールに依存してOK
//! - このモジュールは他のモジュールに依存しない（独立）

use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// ユーザーの入力エラー
    ///
    /// ファイルが見つからない、未対応のHTTPメソッドなど、呼び出し側が直せるもの。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定エラー
    ///
    /// Client ID / Secret / Redirect URI の不足、セッションファイルの破損など。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// システムエラー
    ///
    /// ネットワークエラー、APIの拒否応答など、呼び出し側が直せない外部要因。
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}
