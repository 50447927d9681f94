/// ステータスコマンド
///
/// 保存されたアクセストークンで GET /me にアクセスできるかを確認します。
use crate::commands::client_from_config;
use crate::commands::result::{CommandResult, StatusResult};
use anyhow::{Context, Result};
use dailymotion::Params;
use dailymotion::config::UserConfig;

/// ステータスコマンドを実行
pub async fn execute() -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;

    let Some(session) = &config.session else {
        return Ok(CommandResult::Status(StatusResult {
            is_authenticated: false,
            has_token: false,
            screenname: None,
            obtained_at: None,
        }));
    };
    let obtained_at = Some(session.obtained_at.to_rfc3339());

    let client = client_from_config(&config)?;
    let params = Params::from([("fields".to_string(), "id,screenname".to_string())]);

    let response = client
        .request("GET", "/me", &params)
        .await
        .context("Failed to reach the Dailymotion API")?;

    // 失効したトークンはエラーではなく「未認証」として報告する
    let screenname = response.body_str("screenname").map(str::to_string);
    Ok(CommandResult::Status(StatusResult {
        is_authenticated: response.is_success(),
        has_token: true,
        screenname,
        obtained_at,
    }))
}
