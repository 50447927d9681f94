/// アップロードコマンド
///
/// 動画ファイルをアップロードし、認可ユーザーのアカウントに動画を作成します。
use crate::commands::client_from_config;
use crate::commands::result::{CommandResult, UploadResult};
use anyhow::{Context, Result, bail};
use dailymotion::Params;
use dailymotion::config::UserConfig;
use dailymotion::domain::validator;
use std::path::Path;
use tracing::info;

/// アップロードオプション
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// 動画タイトル（省略時はファイル名）
    pub title: Option<String>,
    /// 公開状態で作成するか
    pub published: bool,
}

/// アップロードコマンドを実行する
///
/// # エラー
/// このレイヤーでは anyhow::Result を返し、
/// ドメイン層・インフラ層のエラーを集約する。
pub async fn execute(file_path: &str, options: UploadOptions) -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;
    config
        .get_access_token()
        .context("You must log in before uploading")?;

    // ネットワークに出る前にファイルを検証（DomainError は anyhow::Error に変換される）
    let file = validator::validate_upload_file(Path::new(file_path))
        .context("File validation failed")?;

    let title = options.title.unwrap_or_else(|| default_title(&file.path));
    let params = build_params(&title, options.published);

    let client = client_from_config(&config)?;
    info!(file = file_path, size = file.size, "starting upload");

    let response = client
        .post_video(&file.path, params)
        .await
        .context("Upload failed")?;

    if !response.is_success() {
        let message = response
            .body
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error");
        bail!(
            "Video creation was rejected (HTTP {}): {}",
            response.status,
            message
        );
    }

    Ok(CommandResult::Upload(UploadResult {
        video_id: response.body_str("id").map(str::to_string),
        title,
        file_path: file_path.to_string(),
        file_size: file.size,
        response: response.body,
    }))
}

/// ファイル名（拡張子なし）をタイトルにする
fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn build_params(title: &str, published: bool) -> Params {
    let mut params = Params::new();
    params.insert("title".to_string(), title.to_string());
    if published {
        params.insert("published".to_string(), "true".to_string());
    }
    params
}
