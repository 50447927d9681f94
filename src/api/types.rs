/// API通信用の型定義
///
/// Dailymotion API のレスポンスをデシリアライズするための構造体を定義します。
use serde::{Deserialize, Serialize};

/// 認証トークンレスポンス
///
/// POST /oauth/token のレスポンス型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// アクセストークン（API呼び出し用）
    pub access_token: String,

    /// トークンタイプ（通常 "Bearer"）
    #[serde(default)]
    pub token_type: Option<String>,

    /// アクセストークンの有効期限（秒）
    #[serde(default)]
    pub expires_in: Option<u64>,

    /// リフレッシュトークン（このSDKでは使用しない）
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// 付与されたスコープ
    #[serde(default)]
    pub scope: Option<String>,

    /// 認可したユーザーのID
    #[serde(default)]
    pub uid: Option<String>,
}

impl TokenResponse {
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// アップロードチケット
///
/// GET /file/upload のレスポンス型。URLは1回限り有効。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTicket {
    pub upload_url: String,

    #[serde(default)]
    pub progress_url: Option<String>,
}

/// アップロード完了レスポンス
///
/// チケットURLへのmultipart送信のレスポンス型。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// 以降の /me/videos 呼び出しで参照するURL
    pub url: String,
}
