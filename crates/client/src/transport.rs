use crate::error::{ClientError, ClientResult};
use crate::types::{HttpRequest, HttpResponse, Method, MultipartPayload, PartContent, RequestBody};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "formpost/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Performs a single request and yields its response.
///
/// Non-success statuses are failures. Implementations never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_config(
            base_url,
            DEFAULT_USER_AGENT,
            DEFAULT_TIMEOUT,
            DEFAULT_CONNECT_TIMEOUT,
        )
    }

    pub fn with_config(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        let base_url = Url::parse(base_url)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a relative endpoint against the configured origin.
    pub fn resolve(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

fn to_form(payload: MultipartPayload) -> ClientResult<Form> {
    let mut form = Form::new();
    for part in payload.parts {
        form = match part.content {
            PartContent::Text(value) => form.text(part.name, value),
            PartContent::File { file_name, content } => {
                let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
                let file_part = Part::bytes(content.to_vec())
                    .file_name(file_name)
                    .mime_str(mime.as_ref())
                    .map_err(|e| ClientError::InvalidPart(e.to_string()))?;
                form.part(part.name, file_part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let url = self.resolve(&request.path)?;

        let builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
        };
        let builder = match request.body {
            RequestBody::Empty => {
                debug!(method = request.method.as_str(), %url, "Sending request");
                builder
            }
            RequestBody::Multipart(payload) => {
                debug!(
                    method = request.method.as_str(),
                    %url,
                    parts = payload.len(),
                    "Sending multipart request"
                );
                builder.multipart(to_form(payload)?)
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::status_error(
                status.as_u16(),
                String::from_utf8_lossy(&body),
            ));
        }

        Ok(HttpResponse::new(status.as_u16(), body))
    }
}
