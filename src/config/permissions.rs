/// セッションファイルのパーミッション管理
///
/// アクセストークンと Client Secret を含む config.toml を所有者のみ読み書き可能にします。
///
/// Unix系 (Linux, macOS): 0600 (rw-------)
/// その他: 既定のACLに任せる
use crate::config::error::ConfigError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// 所有者のみ読み書き可能なファイルとして内容を書き込む
///
/// 新規作成時は最初から 0600 で作られる。既存ファイルは書き込み後に 0600 へ揃える。
pub fn write_owner_only(file_path: &Path, contents: &str) -> Result<(), ConfigError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(file_path).map_err(|e| {
        ConfigError::file_system(
            format!("Failed to open session file: {}", file_path.display()),
            e,
        )
    })?;
    file.write_all(contents.as_bytes()).map_err(|e| {
        ConfigError::file_system(
            format!("Failed to write session file: {}", file_path.display()),
            e,
        )
    })?;

    set_token_file_permissions(file_path)
}

/// トークンファイル用パーミッションを設定
///
/// # Errors
/// ファイルが存在しない場合、またはパーミッション設定に失敗した場合に ConfigError を返します。
pub fn set_token_file_permissions(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.exists() {
        return Err(ConfigError::file_system(
            format!("Session file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File does not exist"),
        ));
    }

    #[cfg(unix)]
    {
        restrict_to_owner(file_path)
    }

    #[cfg(not(unix))]
    {
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_to_owner(file_path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(file_path, permissions).map_err(|e| {
        ConfigError::file_system(
            format!(
                "Failed to set permissions (0600) for session file: {}",
                file_path.display()
            ),
            e,
        )
    })
}
