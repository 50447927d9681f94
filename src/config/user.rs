/// ユーザー設定（セッションストア）モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// SDK 本体はトークンを永続化しないため、呼び出し側であるCLIがここで保持します。
/// Windows: C:\Users\<User>\AppData\Roaming\dailymotion\config.toml
/// macOS:   /Users/<User>/Library/Application Support/dailymotion/config.toml
/// Linux:   /home/<user>/.config/dailymotion/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::config::APP_CONFIG;
use crate::config::error::ConfigError;
use crate::config::permissions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// OAuth2 クライアント設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,

    /// スペース区切りのスコープ
    #[serde(default = "default_scopes")]
    pub scopes: String,
}

/// 認可コード交換で得たアクセストークン
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,

    /// トークン取得時刻（表示用）
    pub obtained_at: DateTime<Utc>,
}

/// ユーザー設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// OAuth2 クライアント情報
    pub client: Option<ClientSettings>,

    /// 現在のセッション
    pub session: Option<SessionToken>,
}

// プライベート関数（serde用）
fn default_scopes() -> String {
    APP_CONFIG.oauth.default_scopes.to_string()
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// ホームディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("dailymotion").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        permissions::write_owner_only(config_path, Self::default_toml_content())
    }

    fn default_toml_content() -> &'static str {
        r#"# Dailymotion CLI - User Configuration
# Client credentials are set with 'dailymotion configure'
# The access token is stored by 'dailymotion login' and removed by 'dailymotion logout'
"#
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// ユーザー設定を保存する
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// 指定パスへユーザー設定を保存する
    ///
    /// トークンを含むため、所有者のみ読み書き可能なファイルとして書き込みます。
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        permissions::write_owner_only(config_path, &content)
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - client.client_id / client_secret / redirect_uri: 空文字列でないこと
    /// - session.access_token: 空文字列でないこと
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(client) = &self.client {
            Self::validate_field(&client.client_id, "client_id", "configure")?;
            Self::validate_field(&client.client_secret, "client_secret", "configure")?;
            Self::validate_field(&client.redirect_uri, "redirect_uri", "configure")?;
        }

        if let Some(session) = &self.session {
            Self::validate_field(&session.access_token, "access_token", "login")?;
        }

        Ok(())
    }

    fn validate_field(value: &str, field_name: &str, command: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::validation_error(format!(
                "{} cannot be empty. Please run 'dailymotion {}' again.",
                field_name, command
            )));
        }
        Ok(())
    }

    /// クライアント情報を設定
    pub fn set_client(&mut self, client: ClientSettings) {
        self.client = Some(client);
    }

    /// クライアント情報を取得
    pub fn get_client(&self) -> Result<&ClientSettings, ConfigError> {
        self.client.as_ref().ok_or_else(|| {
            ConfigError::validation_error(
                "Client credentials not found. Please run 'dailymotion configure' first.",
            )
        })
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// アクセストークンを保存（取得時刻は現在時刻）
    pub fn set_access_token(&mut self, access_token: String) {
        self.session = Some(SessionToken {
            access_token,
            obtained_at: Utc::now(),
        });
    }

    /// アクセストークンを取得
    ///
    /// # Errors
    /// トークンが保存されていない場合に ConfigError::TokenNotFound を返します。
    pub fn get_access_token(&self) -> Result<&str, ConfigError> {
        self.session
            .as_ref()
            .map(|session| session.access_token.as_str())
            .ok_or_else(|| {
                ConfigError::token_not_found(
                    "No access token stored. Please run 'dailymotion login' first.",
                )
            })
    }

    pub fn has_token(&self) -> bool {
        self.session.is_some()
    }

    /// アクセストークンを削除
    pub fn clear_token(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> ClientSettings {
        ClientSettings {
            client_id: "my_client_id".to_string(),
            client_secret: "my_client_secret".to_string(),
            redirect_uri: "http://localhost/callback".to_string(),
            scopes: "manage_videos".to_string(),
        }
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = UserConfig::load_from(&path).expect("default config should load");
        assert!(path.exists());
        assert!(!config.has_client());
        assert!(!config.has_token());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = UserConfig::default();
        config.set_client(sample_client());
        config.set_access_token("tok123".to_string());
        config.save_to(&path).expect("Failed to save config");

        let reloaded = UserConfig::load_from(&path).expect("Failed to reload config");
        let client = reloaded.get_client().unwrap();
        assert_eq!(client.client_id, "my_client_id");
        assert_eq!(client.scopes, "manage_videos");
        assert_eq!(reloaded.get_access_token().unwrap(), "tok123");
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = UserConfig::default();
        config.set_client(sample_client());
        config.save_to(&path).expect("Failed to save config");

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_missing_scopes_default_to_public() {
        let content = r#"
[client]
client_id = "id"
client_secret = "secret"
redirect_uri = "http://localhost"
"#;
        let config: UserConfig = toml::from_str(content).unwrap();
        assert_eq!(config.get_client().unwrap().scopes, "public");
    }

    #[test]
    fn test_validate_rejects_empty_client_secret() {
        let mut config = UserConfig::default();
        let mut client = sample_client();
        client.client_secret = "  ".to_string();
        config.set_client(client);

        match config.validate() {
            Err(ConfigError::ValidationError { message }) => {
                assert!(message.contains("client_secret"))
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_token() {
        let mut config = UserConfig::default();
        config.set_access_token("tok".to_string());
        assert!(config.has_token());

        config.clear_token();
        assert!(!config.has_token());
        assert!(matches!(
            config.get_access_token(),
            Err(ConfigError::TokenNotFound { .. })
        ));
    }

    #[test]
    fn test_config_path() {
        let path = UserConfig::config_path().expect("Failed to get config path");
        assert!(path.to_string_lossy().contains("dailymotion"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
