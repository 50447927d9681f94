mod cli;
mod commands;
mod presentation;

use dailymotion::api::error::InfraError;
use dailymotion::config::error::ConfigError;
use dailymotion::domain::error::DomainError;
use dailymotion::error::Error as SdkError;
use presentation::output;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let parsed = cli::split_args(&args);

    let Some(command) = parsed.command.as_deref() else {
        output::print_usage();
        return;
    };

    let result = cli::dispatch(command, &parsed.rest).await.and_then(|result| {
        output::output_result(&result, parsed.machine_output)
    });

    if let Err(e) = result {
        handle_error(e, parsed.machine_output);
    }
}

/// ログ出力を初期化（stderr、RUST_LOG で制御、既定は warn）
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let json = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "causes": error.chain().skip(1).map(|c| c.to_string()).collect::<Vec<_>>(),
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        std::process::exit(exit_code);
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(sdk_err) = cause.downcast_ref::<SdkError>() {
            return sdk_err.severity().exit_code();
        }
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }
        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 不明なエラーの場合はデフォルトの終了コード
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(sdk_err) = cause.downcast_ref::<SdkError>() {
            if let Some(hint) = sdk_err.hint() {
                return Some(hint.to_string());
            }
        }
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            if let Some(hint) = domain_err.hint() {
                return Some(hint.to_string());
            }
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            if let Some(hint) = config_err.hint() {
                return Some(hint.to_string());
            }
        }
    }

    None
}
