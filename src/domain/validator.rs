/// ドメインサービス: アップロード対象ファイルの検証
///
/// ネットワークに触れる前にローカルファイルの存在を確認する。
/// 形式やサイズの制限は API 側の責務なのでここでは見ない。
use crate::domain::error::DomainError;
use std::path::{Path, PathBuf};

/// ファイルのバリデーション結果
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub path: PathBuf,
    pub size: u64,
}

/// アップロード対象のファイルをバリデーションする
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
pub fn validate_upload_file(file_path: &Path) -> Result<UploadFile, DomainError> {
    let display = file_path.display().to_string();

    if !file_path.exists() {
        return Err(DomainError::file_not_found(display));
    }

    // メタデータ取得に失敗した場合も「見つからない」として扱う
    let metadata =
        std::fs::metadata(file_path).map_err(|_| DomainError::file_not_found(display.clone()))?;

    if metadata.is_dir() {
        return Err(DomainError::not_a_file(display));
    }

    Ok(UploadFile {
        path: file_path.to_path_buf(),
        size: metadata.len(),
    })
}
