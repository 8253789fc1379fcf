use anyhow::{Context, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use url::Url;

use crate::{
    config::BackendConfig,
    domain::{ClassificationResult, ClassifyRequest},
};

use super::{
    error::ClassifyError,
    inference::{function_url, parse_response},
};

/// Anything that can turn a message into a spam verdict.
pub trait ClassifierBackend: Send + Sync {
    fn classify<'a>(
        &'a self,
        message: &'a str,
    ) -> BoxFuture<'a, Result<ClassificationResult, ClassifyError>>;
}

/// Calls the hosted `classify-spam` function over HTTP.
#[derive(Clone)]
pub struct FunctionClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl FunctionClient {
    pub fn new(http: Client, config: &BackendConfig) -> Result<Self> {
        let endpoint = function_url(&config.base_url, &config.function_name).with_context(|| {
            format!(
                "cannot derive function endpoint from {}",
                config.base_url
            )
        })?;
        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn invoke(&self, message: &str) -> Result<ClassificationResult, ClassifyError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .json(&ClassifyRequest { message });
        if let Some(key) = self.api_key.as_deref() {
            request = request.bearer_auth(key).header("apikey", key);
        }

        let response = request.send().await.map_err(ClassifyError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ClassifyError::transport)?;

        tracing::debug!(
            target: "backend",
            status = status.as_u16(),
            bytes = body.len(),
            "classifier responded"
        );
        parse_response(status, &body)
    }
}

impl ClassifierBackend for FunctionClient {
    fn classify<'a>(
        &'a self,
        message: &'a str,
    ) -> BoxFuture<'a, Result<ClassificationResult, ClassifyError>> {
        Box::pin(self.invoke(message))
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;
    use crate::{ai::error::FailureChannel, domain::Classification};

    /// Accepts one connection, answers with the canned response, and hands
    /// back the raw request that was received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (addr, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn client_for(addr: SocketAddr, api_key: Option<&str>) -> FunctionClient {
        let config = BackendConfig {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            api_key: api_key.map(str::to_string),
            function_name: "classify-spam".to_string(),
        };
        FunctionClient::new(Client::new(), &config).unwrap()
    }

    #[tokio::test]
    async fn posts_raw_message_and_parses_verdict() {
        let (addr, server) = serve_once(
            "200 OK",
            r#"{"classification":"spam","confidence":0.87,"reason":"Contains urgency and prize claims"}"#,
        )
        .await;
        let client = client_for(addr, Some("anon-key"));

        let result = client.classify("  WIN a prize!\n").await.unwrap();
        assert_eq!(result.classification, Classification::Spam);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /functions/v1/classify-spam HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer anon-key"));
        assert!(request.to_ascii_lowercase().contains("apikey: anon-key"));
        assert!(request.ends_with(r#"{"message":"  WIN a prize!\n"}"#));
    }

    #[tokio::test]
    async fn http_error_is_reported_failure() {
        let (addr, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let client = client_for(addr, None);

        let err = client.classify("hello").await.unwrap_err();
        assert_eq!(err.channel(), FailureChannel::Reported);

        let request = server.await.unwrap();
        assert!(!request.to_ascii_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_unexpected_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr, None).classify("hello").await.unwrap_err();
        assert_eq!(err.channel(), FailureChannel::Unexpected);
    }
}
