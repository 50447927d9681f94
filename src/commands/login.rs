/// ログインコマンド
///
/// OAuth2 認可コードフローでアクセストークンを取得し、セッションファイルに保存します。
///
/// 1. 推測されにくい state を生成して認可URLを表示
/// 2. ユーザーがブラウザで許可し、リダイレクト先URLを貼り付ける
/// 3. state を照合し、code をアクセストークンに交換
/// 4. トークンを保存（SDK 本体は永続化しない）
use crate::commands::client_from_config;
use crate::commands::result::{CommandResult, LoginResult};
use crate::presentation::input;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use dailymotion::config::UserConfig;
use std::collections::HashMap;
use url::Url;

/// ログインコマンドを実行
pub async fn execute() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let was_logged_in = config.has_token();

    // 古いトークンで Bearer 認証にならないよう、交換は必ずクライアント認証で行う
    let mut client = client_from_config(&config)?;
    client.set_access_token(None);

    let state = generate_state();
    let authorization_url = client
        .build_authorization_endpoint(Some(&state))
        .context("Failed to build the authorization URL")?;

    let callback = input::read_callback_url(&authorization_url)?;
    let code = parse_callback(&callback, &state)?;

    let token = client
        .authorize_strict(&code)
        .await
        .context("Failed to exchange the authorization code for an access token")?;

    config.set_access_token(token.access_token);
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Login(LoginResult {
        was_logged_in,
        scope: token.scope,
        expires_in: token.expires_in,
    }))
}

/// 時刻ベースの不透明な state を生成
pub fn generate_state() -> String {
    let now = Utc::now();
    format!(
        "{:08x}{:05x}",
        now.timestamp(),
        now.timestamp_subsec_micros()
    )
}

/// リダイレクト先URLから認可コードを取り出す
///
/// # Errors
/// - ユーザーが認可画面でキャンセルした（error=access_denied）
/// - state が一致しない
/// - code が含まれていない
pub fn parse_callback(callback_url: &str, expected_state: &str) -> Result<String> {
    let url = Url::parse(callback_url.trim())
        .context("Please paste the full URL you were redirected to")?;

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    if let Some(error) = params.get("error") {
        if error == "access_denied" {
            bail!("The user clicked cancel on the authorization form.");
        }
        let description = params.get("error_description").unwrap_or(error);
        bail!("Authorization was rejected: {}", description);
    }

    if params.get("state").map(String::as_str) != Some(expected_state) {
        bail!("The returned state does not match the one we sent. This is a potential security breach.");
    }

    params
        .get("code")
        .filter(|code| !code.is_empty())
        .cloned()
        .context("The redirect URL does not contain an authorization code")
}
