use crate::commands;
use crate::commands::result::CommandResult;
use crate::commands::upload::UploadOptions;
use crate::presentation::input;
use anyhow::{Context, Result, bail};

/// 解析済みのCLI引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    /// --machine フラグ
    pub machine_output: bool,
    pub command: Option<String>,
    pub rest: Vec<String>,
}

/// グローバルフラグとコマンドを分離する
pub fn split_args(args: &[String]) -> ParsedArgs {
    let mut machine_output = false;
    let mut positional = Vec::new();

    for arg in args.iter().skip(1) {
        if arg == "--machine" {
            machine_output = true;
        } else {
            positional.push(arg.clone());
        }
    }

    let mut positional = positional.into_iter();
    ParsedArgs {
        machine_output,
        command: positional.next(),
        rest: positional.collect(),
    }
}

/// コマンドにディスパッチする
pub async fn dispatch(command: &str, rest: &[String]) -> Result<CommandResult> {
    match command {
        "configure" => {
            let settings = input::read_client_settings_interactive()?;
            commands::configure::execute(settings).context("Configure command failed")
        }
        "login" => commands::login::execute()
            .await
            .context("Login command failed"),
        "logout" => commands::logout::execute().context("Logout command failed"),
        "status" => commands::status::execute()
            .await
            .context("Status command failed"),
        "upload" => {
            let (file_path, options) = parse_upload_args(rest)?;
            commands::upload::execute(&file_path, options)
                .await
                .context("Upload command failed")
        }
        "help" => Ok(commands::help::execute()),
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}

/// upload <file> [--title <title>] [--published]
fn parse_upload_args(rest: &[String]) -> Result<(String, UploadOptions)> {
    let mut file_path = None;
    let mut options = UploadOptions::default();
    let mut iter = rest.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--title" => {
                let title = iter.next().context("--title requires a value")?;
                options.title = Some(title.clone());
            }
            "--published" => options.published = true,
            flag if flag.starts_with("--") => bail!("Unknown option for upload: '{}'", flag),
            path if file_path.is_none() => file_path = Some(path.to_string()),
            extra => bail!("Unexpected argument for upload: '{}'", extra),
        }
    }

    let file_path = file_path.context("Please specify a file path for upload command")?;
    Ok((file_path, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_args_machine_flag_anywhere() {
        let parsed = split_args(&args(&["dailymotion", "status", "--machine"]));
        assert!(parsed.machine_output);
        assert_eq!(parsed.command.as_deref(), Some("status"));
        assert!(parsed.rest.is_empty());
    }

    #[test]
    fn test_split_args_without_command() {
        let parsed = split_args(&args(&["dailymotion"]));
        assert!(!parsed.machine_output);
        assert!(parsed.command.is_none());
    }

    #[test]
    fn test_parse_upload_args() {
        let (path, options) =
            parse_upload_args(&args(&["clip.mp4", "--title", "My clip", "--published"])).unwrap();
        assert_eq!(path, "clip.mp4");
        assert_eq!(options.title.as_deref(), Some("My clip"));
        assert!(options.published);
    }

    #[test]
    fn test_parse_upload_args_errors() {
        assert!(parse_upload_args(&args(&[])).is_err());
        assert!(parse_upload_args(&args(&["a.mp4", "--title"])).is_err());
        assert!(parse_upload_args(&args(&["a.mp4", "--private"])).is_err());
        assert!(parse_upload_args(&args(&["a.mp4", "b.mp4"])).is_err());
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let result = dispatch("frobnicate", &[]).await;
        assert!(result.unwrap_err().to_string().contains("Unknown command"));
    }
}
