/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::CommandResult;
use anyhow::Result;

/// ヘルプテキスト（単一の情報源）
pub const HELP_TEXT: &str = "dailymotion
Upload videos to Dailymotion from the command line

Usage:
  dailymotion [--machine] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases

Available commands:
  configure        - Store the API key, API secret, redirect URI and scopes
  login            - Authorize this application and store an access token
  logout           - Remove the stored access token
  status           - Check whether the stored access token works
  upload <file> [--title <title>] [--published]
                   - Upload a video and create it on your account
  help             - Display this help message

Logging:
  Set RUST_LOG (e.g. RUST_LOG=dailymotion=debug) to see request logs on stderr";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", render_machine_readable(result)?);
    } else {
        output_human_readable(result);
    }
    Ok(())
}

/// 人間向けの詳細メッセージを出力（stderr）
fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Configure(r) => {
            eprintln!();
            eprintln!("{}", result.success_message());
            eprintln!("Client ID:    {}", r.client_id);
            eprintln!("Redirect URI: {}", r.redirect_uri);
            eprintln!("Scopes:       {}", r.scopes);
            eprintln!();
            eprintln!("Run 'dailymotion login' to obtain an access token.");
        }
        CommandResult::Login(r) => {
            eprintln!();
            eprintln!("✓ {}", result.success_message());
            if let Some(scope) = &r.scope {
                eprintln!("Granted scopes: {}", scope);
            }
            if let Some(expires_in) = r.expires_in {
                eprintln!("Token expires in {} minutes.", expires_in / 60);
            }
            eprintln!("The access token has been saved.");
        }
        CommandResult::Logout(r) => {
            eprintln!("{}", result.success_message());
            if r.was_logged_in {
                eprintln!("The access token has been removed.");
            }
        }
        CommandResult::Status(r) => {
            eprintln!();
            if r.is_authenticated {
                eprintln!("Authenticated");
                if let Some(screenname) = &r.screenname {
                    eprintln!("User: {}", screenname);
                }
                if let Some(obtained_at) = &r.obtained_at {
                    eprintln!("Token obtained at: {}", obtained_at);
                }
            } else if r.has_token {
                eprintln!("✗ Authentication failed");
                eprintln!("The stored access token may be invalid or expired.");
                eprintln!("Please run 'dailymotion login' again.");
            } else {
                eprintln!("Not logged in");
                eprintln!("Please run 'dailymotion login' to authenticate.");
            }
        }
        CommandResult::Upload(r) => {
            eprintln!();
            eprintln!("✓ {}", result.success_message());
            eprintln!("---");
            if let Some(video_id) = &r.video_id {
                eprintln!("Video ID: {}", video_id);
                eprintln!("URL:      https://www.dailymotion.com/video/{}", video_id);
            }
            eprintln!("Title:    {}", r.title);
            eprintln!(
                "File:     {} ({:.2} MB)",
                r.file_path,
                r.file_size as f64 / 1024.0 / 1024.0
            );
            eprintln!("---");
        }
        CommandResult::Help => {
            eprintln!("{}", HELP_TEXT);
        }
    }
}

/// 機械可読JSONを生成
///
/// コマンド結果に `success: true` を加えた1行のJSON。
fn render_machine_readable(result: &CommandResult) -> Result<String> {
    let mut json = serde_json::to_value(result)?;
    if let Some(object) = json.as_object_mut() {
        object.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    Ok(serde_json::to_string(&json)?)
}
