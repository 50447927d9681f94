/// プレゼンテーション層: ユーザー入力処理
///
/// stdin からのユーザー入力を取得し、コマンド層で使える形式に変換します。
/// プロンプトはすべて stderr に出し、stdout は --machine 出力用に空けておく。
use anyhow::{Context, Result, bail};
use dailymotion::config::APP_CONFIG;
use dailymotion::config::user::ClientSettings;
use std::io::{self, Write};

/// 1行読み取ってトリムする
fn prompt_line(label: &str) -> Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .with_context(|| format!("Failed to read '{}' from input", label.trim_end_matches([':', ' '])))?;
    Ok(line.trim().to_string())
}

fn prompt_required(label: &str, field: &str) -> Result<String> {
    let value = prompt_line(label)?;
    if value.is_empty() {
        bail!("{} cannot be empty. Please provide a valid {}.", field, field);
    }
    Ok(value)
}

/// 対話的にクライアント情報を取得
pub fn read_client_settings_interactive() -> Result<ClientSettings> {
    eprintln!("Configuring Dailymotion API access...");
    eprintln!();
    eprintln!("Please enter the API key and secret of your Dailymotion application.");
    eprintln!("The redirect URI must match the callback URL registered for the application.");
    eprintln!();

    let client_id = prompt_required("API Key (Client ID): ", "Client ID")?;
    let client_secret = prompt_required("API Secret (Client Secret): ", "Client Secret")?;
    let redirect_uri = prompt_required("Redirect URI: ", "Redirect URI")?;

    let scopes = prompt_line(&format!(
        "Scopes (space separated) [{}]: ",
        APP_CONFIG.oauth.default_scopes
    ))?;
    let scopes = if scopes.is_empty() {
        APP_CONFIG.oauth.default_scopes.to_string()
    } else {
        scopes
    };

    Ok(ClientSettings {
        client_id,
        client_secret,
        redirect_uri,
        scopes,
    })
}

/// 認可URLを表示し、リダイレクト先URLを読み取る
pub fn read_callback_url(authorization_url: &str) -> Result<String> {
    eprintln!("Open the following URL in your browser and authorize the application:");
    eprintln!();
    eprintln!("  {}", authorization_url);
    eprintln!();
    eprintln!("After authorizing you will be redirected. Paste the full redirected URL below.");
    eprintln!();

    prompt_required("Redirected URL: ", "Redirected URL")
}
