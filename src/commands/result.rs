/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use serde::Serialize;
use serde_json::Value;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Configure(ConfigureResult),
    Login(LoginResult),
    Logout(LogoutResult),
    Upload(UploadResult),
    Status(StatusResult),
    Help,
}

/// configure コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureResult {
    /// マスキングされた Client ID
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: String,
    /// 既存の設定を上書きしたか
    pub was_configured: bool,
}

/// ログインコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// 既にトークンを持っていたか（上書き更新の場合true）
    pub was_logged_in: bool,
    /// 付与されたスコープ
    pub scope: Option<String>,
    /// トークンの有効期限（秒）
    pub expires_in: Option<u64>,
}

/// ログアウトコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResult {
    /// ログイン状態だったか
    pub was_logged_in: bool,
}

/// ステータスコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    /// トークンで /me にアクセスできたか
    pub is_authenticated: bool,
    /// トークンが保存されているか
    pub has_token: bool,
    /// 認可ユーザーのスクリーンネーム
    pub screenname: Option<String>,
    /// トークン取得時刻（RFC 3339）
    pub obtained_at: Option<String>,
}

/// アップロードコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    /// 作成された動画のID
    pub video_id: Option<String>,
    pub title: String,
    pub file_path: String,
    /// ファイルサイズ（bytes）
    pub file_size: u64,
    /// POST /me/videos のレスポンスボディ
    pub response: Value,
}

impl CommandResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Configure(r) => {
                if r.was_configured {
                    "Client settings updated.".to_string()
                } else {
                    "Client settings saved.".to_string()
                }
            }
            CommandResult::Login(r) => {
                if r.was_logged_in {
                    "Access token refreshed!".to_string()
                } else {
                    "Login successful!".to_string()
                }
            }
            CommandResult::Logout(r) => {
                if r.was_logged_in {
                    "Logged out successfully.".to_string()
                } else {
                    "Already logged out.".to_string()
                }
            }
            CommandResult::Upload(_) => "Upload completed successfully!".to_string(),
            CommandResult::Status(r) => {
                if r.is_authenticated {
                    "Authenticated".to_string()
                } else {
                    "Not authenticated".to_string()
                }
            }
            CommandResult::Help => "".to_string(),
        }
    }
}
