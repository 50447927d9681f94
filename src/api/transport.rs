/// HTTPトランスポート
///
/// リクエストエンジンとネットワークの境界。
/// トランスポートは「ヘッダーブロック + ボディ」を連結した生バイト列と
/// ヘッダー長を返し、分割と解釈は上位（response モジュール）が行う。
use crate::api::error::InfraError;
use crate::domain::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode, Version};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::io::ReaderStream;

/// リクエストボディ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// application/x-www-form-urlencoded のエンコード済み文字列
    Form(String),
    /// multipart/form-data で送るローカルファイル
    Multipart { field: String, path: PathBuf },
}

/// トランスポートに渡す完全なリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    /// API ルートを含む完全なURL
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// None はタイムアウトなし
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// ヘッダーを大文字小文字を区別せずに取得
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// 生レスポンス
///
/// `data` の先頭 `header_size` バイトがヘッダーブロック、残りがボディ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub data: Vec<u8>,
    pub header_size: usize,
}

impl RawResponse {
    pub fn new(status: u16, header_block: &str, body: &[u8]) -> Self {
        let mut data = Vec::with_capacity(header_block.len() + body.len());
        data.extend_from_slice(header_block.as_bytes());
        data.extend_from_slice(body);
        Self {
            status,
            data,
            header_size: header_block.len(),
        }
    }

    /// ヘッダー長で (ヘッダー, ボディ) に分割
    pub fn split(&self) -> (&[u8], &[u8]) {
        let at = self.header_size.min(self.data.len());
        self.data.split_at(at)
    }
}

/// HTTPトランスポートの抽象
///
/// 本番は [`ReqwestTransport`]、テストでは記録用のモックを差し込む。
pub trait Transport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<RawResponse, InfraError>> + Send;
}

/// reqwest によるトランスポート
///
/// リダイレクトは追従しない。タイムアウトはリクエストごとに設定する。
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, InfraError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn to_reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// ファイルをストリームとして送る multipart フォームを構築
    ///
    /// ファイル全体をメモリに載せず、送信しながらディスクから読む。
    async fn multipart_form(field: String, path: &Path) -> Result<Form, InfraError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| InfraError::io(format!("Failed to open {}", path.display()), e))?;
        let length = file
            .metadata()
            .await
            .map_err(|e| InfraError::io(format!("Failed to read metadata of {}", path.display()), e))?
            .len();

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let body = Body::wrap_stream(ReaderStream::new(file));
        Ok(Form::new().part(
            field,
            Part::stream_with_length(body, length).file_name(file_name),
        ))
    }

    /// ステータス行とヘッダーを生のヘッダーブロックに戻す
    fn header_block(status: StatusCode, version: Version, headers: &HeaderMap) -> String {
        let mut block = format!(
            "{:?} {} {}\r\n",
            version,
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );
        for (name, value) in headers {
            block.push_str(name.as_str());
            block.push_str(": ");
            block.push_str(&String::from_utf8_lossy(value.as_bytes()));
            block.push_str("\r\n");
        }
        block.push_str("\r\n");
        block
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, InfraError> {
        let operation = format!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(encoded) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encoded),
            RequestBody::Multipart { field, path } => {
                builder.multipart(Self::multipart_form(field, &path).await?)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| InfraError::from_reqwest(e, &operation))?;

        let status = response.status();
        let header_block = Self::header_block(status, response.version(), response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| InfraError::from_reqwest(e, &operation))?;

        Ok(RawResponse::new(status.as_u16(), &header_block, &body))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// 送信されたリクエストを記録し、用意したレスポンスを順に返すモック
    #[derive(Debug, Clone, Default)]
    pub struct MockTransport {
        responses: Arc<Mutex<VecDeque<RawResponse>>>,
        requests: Arc<Mutex<Vec<TransportRequest>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// JSON ボディのレスポンスを積む
        pub fn push_json(&self, status: u16, body: &str) {
            let header = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\n\r\n",
                status
            );
            self.responses
                .lock()
                .unwrap()
                .push_back(RawResponse::new(status, &header, body.as_bytes()));
        }

        pub fn requests(&self) -> Vec<TransportRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, request: TransportRequest) -> Result<RawResponse, InfraError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| InfraError::network("mock transport has no queued response"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{body_string, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn get_request(url: String) -> TransportRequest {
        TransportRequest {
            method: Method::Get,
            url,
            headers: vec![("User-Agent".to_string(), "test-agent".to_string())],
            body: RequestBody::Empty,
            timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn test_raw_split_clamps_header_size() {
        let raw = RawResponse {
            status: 200,
            data: b"abc".to_vec(),
            header_size: 10,
        };
        let (head, body) = raw.split();
        assert_eq!(head, b"abc");
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_reqwest_transport_returns_header_block_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("user-agent", "test-agent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-request-id", "r-1")
                    .set_body_string(r#"{"id":"u1"}"#),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let raw = transport
            .send(get_request(format!("{}/me", server.uri())))
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
        let (head, body) = raw.split();
        let head = String::from_utf8_lossy(head);
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("x-request-id: r-1\r\n"));
        assert_eq!(body, br#"{"id":"u1"}"#);
    }

    #[tokio::test]
    async fn test_reqwest_transport_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/elsewhere"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let raw = transport
            .send(get_request(format!("{}/moved", server.uri())))
            .await
            .unwrap();

        assert_eq!(raw.status, 302);
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/video/x1"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("title=new+title"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let raw = transport
            .send(TransportRequest {
                method: Method::Patch,
                url: format!("{}/video/x1", server.uri()),
                headers: Vec::new(),
                body: RequestBody::Form("title=new+title".to_string()),
                timeout: None,
            })
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
    }

    #[tokio::test]
    async fn test_reqwest_transport_uploads_multipart_file() {
        let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        file.write_all(b"FAKE-VIDEO-BYTES").unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("FAKE-VIDEO-BYTES"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"url":"https://u"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let raw = transport
            .send(TransportRequest {
                method: Method::Post,
                url: format!("{}/upload", server.uri()),
                headers: Vec::new(),
                body: RequestBody::Multipart {
                    field: "file".to_string(),
                    path: file.path().to_path_buf(),
                },
                timeout: None,
            })
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
    }

    #[tokio::test]
    async fn test_reqwest_transport_streams_file_across_chunks() {
        let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        let filler = "0123456789abcdef".repeat(64 * 1024 / 16);
        file.write_all(filler.as_bytes()).unwrap();
        file.write_all(b"END-OF-VIDEO").unwrap();
        let file_name = file.path().file_name().unwrap().to_string_lossy().into_owned();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains(format!("filename=\"{}\"", file_name)))
            .and(body_string_contains(format!("{}END-OF-VIDEO", filler)))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"url":"https://u"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let raw = transport
            .send(TransportRequest {
                method: Method::Post,
                url: format!("{}/upload", server.uri()),
                headers: Vec::new(),
                body: RequestBody::Multipart {
                    field: "file".to_string(),
                    path: file.path().to_path_buf(),
                },
                timeout: None,
            })
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
    }

    #[tokio::test]
    async fn test_multipart_missing_file_is_io_error() {
        let transport = ReqwestTransport::new().unwrap();
        let result = transport
            .send(TransportRequest {
                method: Method::Post,
                url: "http://127.0.0.1:1/upload".to_string(),
                headers: Vec::new(),
                body: RequestBody::Multipart {
                    field: "file".to_string(),
                    path: PathBuf::from("/no/such/video.mp4"),
                },
                timeout: None,
            })
            .await;
        assert!(matches!(result, Err(InfraError::Io { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let transport = ReqwestTransport::new().unwrap();
        let result = transport
            .send(get_request("http://127.0.0.1:1/unreachable".to_string()))
            .await;
        assert!(matches!(result, Err(InfraError::Network { .. })));
    }
}
