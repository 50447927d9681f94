/// configure コマンド
///
/// OAuth2 クライアント情報（Client ID / Secret / Redirect URI / スコープ）を
/// セッションファイルに保存します。
use crate::commands::mask;
use crate::commands::result::{CommandResult, ConfigureResult};
use anyhow::{Context, Result};
use dailymotion::config::UserConfig;
use dailymotion::config::user::ClientSettings;

/// configure コマンドを実行
///
/// クライアント情報が変わると既存のトークンは無効になるため、セッションも破棄する。
pub fn execute(settings: ClientSettings) -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let was_configured = config.has_client();

    let result = ConfigureResult {
        client_id: mask(&settings.client_id),
        redirect_uri: settings.redirect_uri.clone(),
        scopes: settings.scopes.clone(),
        was_configured,
    };

    config.set_client(settings);
    config.clear_token();
    config
        .validate()
        .context("The entered client settings are invalid")?;
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Configure(result))
}
