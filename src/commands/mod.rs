pub mod configure;
pub mod help;
pub mod login;
pub mod logout;
pub mod result;
pub mod status;
pub mod upload;

use anyhow::{Context, Result};
use dailymotion::Dailymotion;
use dailymotion::config::UserConfig;

/// セッションファイルの内容から API クライアントを組み立てる
///
/// トークンが保存されていれば Bearer、なければ Basic で認証される。
pub fn client_from_config(config: &UserConfig) -> Result<Dailymotion> {
    let settings = config
        .get_client()
        .context("Client settings are required for this command")?;

    let mut client = Dailymotion::new(
        Some(settings.client_id.clone()),
        Some(settings.client_secret.clone()),
        config.session.as_ref().map(|s| s.access_token.clone()),
    )
    .context("Failed to create Dailymotion client")?;

    client.set_redirect_uri(settings.redirect_uri.clone());
    client.set_scopes(settings.scopes.as_str());

    Ok(client)
}

/// 表示用に値をマスキング
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}
