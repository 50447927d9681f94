/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - CLI が実行時に読み書きするセッションファイル
///
/// # 使用例
///
/// ```rust,no_run
/// use dailymotion::config::{APP_CONFIG, UserConfig};
///
/// // AppConfig: グローバル定数として直接参照
/// let root = APP_CONFIG.api.endpoint;
///
/// // UserConfig: load時に自動検証
/// let user_config = UserConfig::load()?;
/// let token = user_config.get_access_token()?;
/// # Ok::<(), dailymotion::config::error::ConfigError>(())
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::APP_CONFIG;
pub use user::UserConfig;
