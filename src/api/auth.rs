/// 認証情報と認可URL
///
/// Client ID / Secret / Redirect URI / スコープを保持し、
/// HTTP Basic 認証ヘッダーと OAuth2 認可エンドポイントURLを生成します。
use crate::config::APP_CONFIG;
use crate::domain::Scopes;
use crate::domain::error::DomainError;
use base64::{Engine as _, engine::general_purpose};
use url::form_urlencoded;

/// OAuth2 クライアント設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    scopes: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            scopes: APP_CONFIG.oauth.default_scopes.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.client_id = Some(client_id.into());
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn set_client_secret(&mut self, client_secret: impl Into<String>) {
        self.client_secret = Some(client_secret.into());
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) {
        self.redirect_uri = Some(redirect_uri.into());
    }

    pub fn scopes(&self) -> &str {
        &self.scopes
    }

    /// スコープを設定
    ///
    /// スペース区切り文字列、またはスコープ名の列を受け付ける。
    pub fn set_scopes(&mut self, scopes: impl Into<Scopes>) {
        self.scopes = scopes.into().into_string();
    }

    /// 認可に必要な3項目が揃っていることを確認
    ///
    /// 認可URL自体には Secret は含まれないが、後のトークン交換で必ず失敗するため
    /// ここで先に弾く。
    pub fn verify_present(&self, message: &str) -> Result<Verified<'_>, DomainError> {
        match (
            non_empty(&self.client_id),
            non_empty(&self.client_secret),
            non_empty(&self.redirect_uri),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Ok(Verified {
                client_id,
                client_secret,
                redirect_uri,
            }),
            _ => Err(DomainError::incomplete_credentials(message)),
        }
    }

    /// HTTP Basic認証ヘッダーの値を生成
    ///
    /// # Returns
    /// "Basic <base64(client_id:client_secret)>" 形式の文字列。未設定の項目は空文字列として扱う。
    pub fn basic_auth_header(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.client_id.as_deref().unwrap_or_default(),
            self.client_secret.as_deref().unwrap_or_default()
        );
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// ユーザーを送る認可エンドポイントURLを構築
    ///
    /// パラメータ順は response_type, client_id, redirect_uri, scope, state で固定。
    /// state は空でない場合のみ付与する。
    pub fn build_authorization_endpoint(
        &self,
        api_root: &str,
        state: Option<&str>,
    ) -> Result<String, DomainError> {
        let verified = self.verify_present(
            "Can not build authorization endpoint without Client ID, Client Secret, and Redirect URI",
        )?;

        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", verified.client_id)
            .append_pair("redirect_uri", verified.redirect_uri)
            .append_pair("scope", &self.scopes);

        if let Some(state) = state.filter(|s| !s.is_empty()) {
            query.append_pair("state", state);
        }

        Ok(format!(
            "{}{}?{}",
            api_root,
            APP_CONFIG.oauth.authorize_path,
            query.finish()
        ))
    }
}

/// 検証済みの認証情報（借用）
#[derive(Debug, Clone, Copy)]
pub struct Verified<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use url::Url;

    fn configured() -> ClientConfig {
        let mut config = ClientConfig::default();
        config.set_client_id("my_client_id");
        config.set_client_secret("my_client_secret");
        config.set_redirect_uri("http://localhost:8080/callback?x=1");
        config
    }

    fn query_of(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_default_scopes_is_public() {
        assert_eq!(ClientConfig::default().scopes(), "public");
    }

    #[test]
    fn test_set_scopes_from_sequence() {
        let mut config = ClientConfig::default();
        config.set_scopes(["a", "b", "c"]);
        assert_eq!(config.scopes(), "a b c");

        config.set_scopes("manage_videos");
        assert_eq!(config.scopes(), "manage_videos");
    }

    #[test]
    fn test_basic_auth_header_generation() {
        let header = configured().basic_auth_header();
        assert!(header.starts_with("Basic "));

        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(
            String::from_utf8(decoded).unwrap(),
            "my_client_id:my_client_secret"
        );
    }

    #[test]
    fn test_authorization_endpoint_query() {
        let mut config = configured();
        config.set_scopes(vec!["manage_videos", "email"]);

        let url = config
            .build_authorization_endpoint("https://api.dailymotion.com", Some("5f2b1c"))
            .unwrap();
        assert!(url.starts_with("https://api.dailymotion.com/oauth/authorize?"));

        let query = query_of(&url);
        assert_eq!(query.len(), 5);
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["client_id"], "my_client_id");
        assert_eq!(query["redirect_uri"], "http://localhost:8080/callback?x=1");
        assert_eq!(query["scope"], "manage_videos email");
        assert_eq!(query["state"], "5f2b1c");
    }

    #[test]
    fn test_authorization_endpoint_parameter_order_is_stable() {
        let url = configured()
            .build_authorization_endpoint("https://api.dailymotion.com", None)
            .unwrap();
        let keys: Vec<String> = Url::parse(&url)
            .unwrap()
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, ["response_type", "client_id", "redirect_uri", "scope"]);
    }

    #[test]
    fn test_empty_state_is_omitted() {
        let url = configured()
            .build_authorization_endpoint("https://api.dailymotion.com", Some(""))
            .unwrap();
        assert!(!query_of(&url).contains_key("state"));
    }

    #[test]
    fn test_missing_secret_fails() {
        let mut config = ClientConfig::default();
        config.set_client_id("id");
        config.set_redirect_uri("http://localhost");

        let result = config.build_authorization_endpoint("https://api.dailymotion.com", None);
        assert!(matches!(
            result,
            Err(DomainError::IncompleteCredentials { .. })
        ));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let mut config = configured();
        config.set_redirect_uri("");
        assert!(config.verify_present("missing").is_err());
    }
}
