//! Dailymotion REST/OAuth2 API のクライアントSDK
//!
//! 認可URLの構築、認可コードとアクセストークンの交換、署名付きリクエスト、
//! チケット方式の動画アップロードを提供します。
//!
//! ```rust,no_run
//! use dailymotion::{Dailymotion, Params};
//!
//! # async fn run() -> dailymotion::Result<()> {
//! let mut client = Dailymotion::new(
//!     Some("my_client_id".to_string()),
//!     Some("my_client_secret".to_string()),
//!     None,
//! )?;
//! client.set_redirect_uri("http://localhost/callback");
//! client.set_scopes(["manage_videos"]);
//!
//! // ユーザーをこのURLへ送り、戻ってきた code を交換する
//! let url = client.build_authorization_endpoint(Some("opaque-state"))?;
//! println!("{}", url);
//! client.authorize("code-from-redirect").await?;
//!
//! let mut params = Params::new();
//! params.insert("title".to_string(), "My video".to_string());
//! let response = client.post_video("video.mp4", params).await?;
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod error_severity;

pub use api::{Dailymotion, HttpResponse, Params, RequestOptions};
pub use error::{Error, Result};
