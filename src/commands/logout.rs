/// ログアウトコマンド
///
/// 保存されているアクセストークンを削除します（クライアント情報は残す）。
use crate::commands::result::{CommandResult, LogoutResult};
use anyhow::{Context, Result};
use dailymotion::config::UserConfig;

/// ログアウトコマンドを実行
pub fn execute() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    let was_logged_in = config.has_token();
    if !was_logged_in {
        return Ok(CommandResult::Logout(LogoutResult {
            was_logged_in: false,
        }));
    }

    config.clear_token();
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Logout(LogoutResult {
        was_logged_in: true,
    }))
}
