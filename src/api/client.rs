/// Dailymotion APIクライアント
///
/// 認証情報の保持、認可URLの構築、署名付きリクエスト、認可コード交換、
/// 2段階アップロード（チケット取得 → 生ファイル送信）を担当します。
///
/// アクセストークンを書き換える操作（`authorize`、`set_access_token`）は
/// `&mut self` を取るため、書き込みは常に1か所からに限られます。
use crate::api::auth::ClientConfig;
use crate::api::error::InfraError;
use crate::api::response::HttpResponse;
use crate::api::transport::{RawResponse, ReqwestTransport, RequestBody, Transport, TransportRequest};
use crate::api::types::{TokenResponse, UploadTicket, UploadedFile};
use crate::config::APP_CONFIG;
use crate::domain::validator;
use crate::domain::{Method, Scopes};
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::form_urlencoded;

/// リクエストパラメータ（GETではクエリ、それ以外ではフォームボディ）
pub type Params = BTreeMap<String, String>;

/// リクエストごとの上書き可能なオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// None はタイムアウトなし
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(APP_CONFIG.api.timeout_seconds)),
        }
    }
}

/// APIクライアント
#[derive(Debug, Clone)]
pub struct Dailymotion<T = ReqwestTransport> {
    transport: T,
    api_root: String,
    config: ClientConfig,
    access_token: Option<String>,
    upload_timeout: Option<Duration>,
}

impl Dailymotion<ReqwestTransport> {
    /// reqwest トランスポートでクライアントを作成
    ///
    /// # Arguments
    /// * `client_id` - OAuth2 Client ID（API key）
    /// * `client_secret` - OAuth2 Client Secret
    /// * `access_token` - セッションから復元したアクセストークン
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        access_token: Option<String>,
    ) -> Result<Self> {
        let mut client = Self::with_transport(ReqwestTransport::new()?);
        if let Some(client_id) = client_id {
            client.set_client_id(client_id);
        }
        if let Some(client_secret) = client_secret {
            client.set_client_secret(client_secret);
        }
        client.set_access_token(access_token);
        Ok(client)
    }
}

impl<T: Transport> Dailymotion<T> {
    /// 任意のトランスポートでクライアントを作成
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            api_root: APP_CONFIG.api.endpoint.to_string(),
            config: ClientConfig::default(),
            access_token: None,
            upload_timeout: APP_CONFIG.upload.timeout_seconds.map(Duration::from_secs),
        }
    }

    /// API ルートURLを差し替える（末尾のスラッシュは除去）
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn client_id(&self) -> Option<&str> {
        self.config.client_id()
    }

    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.config.set_client_id(client_id);
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.config.client_secret()
    }

    pub fn set_client_secret(&mut self, client_secret: impl Into<String>) {
        self.config.set_client_secret(client_secret);
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.config.redirect_uri()
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) {
        self.config.set_redirect_uri(redirect_uri);
    }

    pub fn scopes(&self) -> &str {
        self.config.scopes()
    }

    pub fn set_scopes(&mut self, scopes: impl Into<Scopes>) {
        self.config.set_scopes(scopes);
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// アクセストークンを設定（None で破棄）
    pub fn set_access_token(&mut self, access_token: Option<String>) {
        self.access_token = access_token;
    }

    pub fn upload_timeout(&self) -> Option<Duration> {
        self.upload_timeout
    }

    /// 生ファイル送信のタイムアウトを設定（None で無制限）
    pub fn set_upload_timeout(&mut self, timeout: Option<Duration>) {
        self.upload_timeout = timeout;
    }

    /// ユーザーを送る認可エンドポイントURLを構築
    ///
    /// # Errors
    /// Client ID / Secret / Redirect URI のいずれかが未設定なら
    /// DomainError::IncompleteCredentials。
    pub fn build_authorization_endpoint(&self, state: Option<&str>) -> Result<String> {
        Ok(self
            .config
            .build_authorization_endpoint(&self.api_root, state)?)
    }

    /// API にリクエストを送信
    ///
    /// メソッド名は大文字小文字を区別しない。GET/POST/PATCH/PUT/DELETE 以外は
    /// ネットワークに出る前に DomainError::UnsupportedMethod で失敗する。
    /// ステータスコードは解釈せず、そのまま返す。
    pub async fn request(&self, method: &str, path: &str, params: &Params) -> Result<HttpResponse> {
        let method: Method = method.parse()?;
        self.request_with(method, path, params, RequestOptions::default())
            .await
    }

    /// オプション付きでリクエストを送信
    pub async fn request_with(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let request = self.build_request(method, path, params, options);
        debug!(method = %method, path, "dispatching API request");

        let raw = self.transport.send(request).await?;
        let response = HttpResponse::from_raw(raw);

        debug!(method = %method, path, status = response.status, "API response received");
        Ok(response)
    }

    /// 署名付きリクエストを組み立てる
    fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        options: RequestOptions,
    ) -> TransportRequest {
        let endpoint = format!("{}{}", self.api_root, path);
        let encoded = encode_params(params);

        let (url, body) = if method.carries_body() {
            (endpoint, RequestBody::Form(encoded))
        } else if encoded.is_empty() {
            (endpoint, RequestBody::Empty)
        } else {
            (format!("{}?{}", endpoint, encoded), RequestBody::Empty)
        };

        TransportRequest {
            method,
            url,
            headers: vec![
                ("User-Agent".to_string(), APP_CONFIG.api.user_agent.to_string()),
                ("Authorization".to_string(), self.authorization_header()),
            ],
            body,
            timeout: options.timeout,
        }
    }

    /// トークンがあれば Bearer、なければクライアント認証情報で Basic
    fn authorization_header(&self) -> String {
        match self.access_token.as_deref().filter(|token| !token.is_empty()) {
            Some(token) => format!("Bearer {}", token),
            None => self.config.basic_auth_header(),
        }
    }

    /// 認可コードをアクセストークンに交換
    ///
    /// レスポンスに `access_token` があればキャッシュを更新する。
    /// ステータスやトークンの有無は検査せず、レスポンスをそのまま返す。
    pub async fn authorize(&mut self, authorization_code: &str) -> Result<HttpResponse> {
        let params = self.token_exchange_params(authorization_code)?;

        let response = self
            .request_with(
                Method::Post,
                APP_CONFIG.oauth.token_path,
                &params,
                RequestOptions::default(),
            )
            .await?;

        if let Some(token) = response.body_str("access_token") {
            self.access_token = Some(token.to_string());
            info!("access token obtained from authorization code");
        }

        Ok(response)
    }

    /// 認可コード交換の厳格版
    ///
    /// # Errors
    /// ステータスが200以外、または `access_token` を含まない場合に
    /// InfraError::Authorization。
    pub async fn authorize_strict(&mut self, authorization_code: &str) -> Result<TokenResponse> {
        let response = self.authorize(authorization_code).await?;
        let status = response.status;

        if status != 200 {
            let message = response
                .body_str("error_description")
                .or_else(|| response.body_str("error"))
                .unwrap_or("token endpoint rejected the authorization code")
                .to_string();
            return Err(InfraError::Authorization { status, message }.into());
        }

        serde_json::from_value::<TokenResponse>(response.body)
            .ok()
            .filter(TokenResponse::is_valid)
            .ok_or_else(|| {
                InfraError::Authorization {
                    status,
                    message: "response did not contain an access_token".to_string(),
                }
                .into()
            })
    }

    fn token_exchange_params(&self, authorization_code: &str) -> Result<Params> {
        let verified = self.config.verify_present(
            "Can not get access token without Client ID, Client Secret, and Redirect URI",
        )?;

        Ok(Params::from([
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), authorization_code.to_string()),
            ("client_id".to_string(), verified.client_id.to_string()),
            ("client_secret".to_string(), verified.client_secret.to_string()),
            ("redirect_uri".to_string(), verified.redirect_uri.to_string()),
        ]))
    }

    /// ファイルをアップロードし、以降の API 呼び出しで使えるURLを返す
    ///
    /// 1. ローカルファイルの存在確認（ネットワークに出る前）
    /// 2. GET /file/upload でチケット取得（200以外は InfraError::UploadTicket）
    /// 3. チケットURLへ multipart で送信（認証ヘッダーなし、タイムアウトは upload_timeout）
    /// 4. 2xx 以外は InfraError::UploadRejected、成功ならレスポンスの `url` を返す
    pub async fn upload(&self, file_path: impl AsRef<Path>) -> Result<String> {
        let file = validator::validate_upload_file(file_path.as_ref())?;

        let ticket_path = APP_CONFIG.upload.ticket_path;
        let response = self
            .request_with(Method::Get, ticket_path, &Params::new(), RequestOptions::default())
            .await?;

        if response.status != 200 {
            return Err(InfraError::UploadTicket {
                status: response.status,
            }
            .into());
        }

        let ticket: UploadTicket = serde_json::from_value(response.body)
            .map_err(|_| InfraError::missing_field(ticket_path, "upload_url"))?;

        info!(size = file.size, "uploading file to ticket URL");
        let raw = self
            .transport
            .send(TransportRequest {
                method: Method::Post,
                url: ticket.upload_url.clone(),
                headers: Vec::new(),
                body: RequestBody::Multipart {
                    field: APP_CONFIG.upload.file_field.to_string(),
                    path: file.path,
                },
                timeout: self.upload_timeout,
            })
            .await?;

        let uploaded = Self::decode_uploaded(raw, &ticket.upload_url)?;
        info!("file upload completed");
        Ok(uploaded.url)
    }

    fn decode_uploaded(raw: RawResponse, upload_url: &str) -> Result<UploadedFile> {
        let response = HttpResponse::from_raw(raw);
        debug!(status = response.status, "upload response received");

        if !response.is_success() {
            return Err(InfraError::UploadRejected {
                endpoint: upload_url.to_string(),
                status: response.status,
            }
            .into());
        }

        serde_json::from_value(response.body)
            .map_err(|_| InfraError::missing_field(upload_url, "url").into())
    }

    /// ファイルをアップロードして認可ユーザーのアカウントに動画を作成
    ///
    /// アップロードで失敗した場合は動画作成を行わずにそのまま返す。
    pub async fn post_video(
        &self,
        file_path: impl AsRef<Path>,
        mut params: Params,
    ) -> Result<HttpResponse> {
        let url = self.upload(file_path).await?;
        params.insert("url".to_string(), url);

        self.request_with(
            Method::Post,
            APP_CONFIG.upload.videos_path,
            &params,
            RequestOptions::default(),
        )
        .await
    }
}

/// パラメータを application/x-www-form-urlencoded にエンコード
fn encode_params(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}
