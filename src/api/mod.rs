/// Dailymotion API クライアントモジュール
///
/// - `auth`: クライアント認証情報と認可URLの構築
/// - `client`: リクエストエンジン、認可コード交換、アップロード
/// - `response`: 生レスポンスの分割とJSONデコード
/// - `transport`: ネットワーク境界（reqwest 実装）
pub mod auth;
pub mod client;
pub mod error;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{Dailymotion, Params, RequestOptions};
pub use response::HttpResponse;
