/// アプリケーション設定モジュール
///
/// コンパイル時定数として定義される静的設定を管理します。
/// これらの設定は実行時には変更できません（上書きはクライアント側のオプションで行う）。

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub oauth: OAuthConfig,
    pub upload: UploadConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// Dailymotion API のルートURL
    pub endpoint: &'static str,

    /// APIリクエストのタイムアウト(秒)
    pub timeout_seconds: u64,

    /// 全リクエストに付与する User-Agent
    pub user_agent: &'static str,
}

/// OAuth2 関連の設定
#[derive(Debug, Clone, Copy)]
pub struct OAuthConfig {
    /// 認可エンドポイントのパス（ルートURLからの相対）
    pub authorize_path: &'static str,

    /// 認可コードをトークンに交換するエンドポイント
    pub token_path: &'static str,

    /// client_credentials グラント用エンドポイント（予約済み・未使用）
    pub client_credentials_token_path: &'static str,

    /// スコープ未指定時のデフォルト
    pub default_scopes: &'static str,
}

/// アップロード関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// アップロードチケットを取得するエンドポイント
    pub ticket_path: &'static str,

    /// 動画作成エンドポイント
    pub videos_path: &'static str,

    /// multipart のファイルフィールド名
    pub file_field: &'static str,

    /// 生ファイル送信のタイムアウト(秒)。None は無制限
    pub timeout_seconds: Option<u64>,
}

/// グローバルなアプリケーション設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "https://api.dailymotion.com",
        timeout_seconds: 30,
        user_agent: concat!("dailymotion-rust-sdk/", env!("CARGO_PKG_VERSION")),
    },
    oauth: OAuthConfig {
        authorize_path: "/oauth/authorize",
        token_path: "/oauth/token",
        client_credentials_token_path: "/oauth/authorize/client",
        default_scopes: "public",
    },
    upload: UploadConfig {
        ticket_path: "/file/upload",
        videos_path: "/me/videos",
        file_field: "file",
        timeout_seconds: None,
    },
};
