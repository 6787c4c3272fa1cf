use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
}

/// A user-selected file held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub file_name: String,
    pub content: Bytes,
}

impl FileHandle {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(Self::new(file_name, content))
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    Text(String),
    File { file_name: String, content: Bytes },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub content: PartContent,
}

impl Part {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: PartContent::Text(value.into()),
        }
    }

    pub fn file(name: impl Into<String>, file: &FileHandle) -> Self {
        Self {
            name: name.into(),
            content: PartContent::File {
                file_name: file.file_name.clone(),
                content: file.content.clone(),
            },
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match &self.content {
            PartContent::File { file_name, .. } => Some(file_name.as_str()),
            PartContent::Text(_) => None,
        }
    }
}

/// Ordered multipart body, kept independent of the HTTP client so it can be
/// inspected before it goes on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    pub parts: Vec<Part>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::text(name, value));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: &FileHandle) -> Self {
        self.parts.push(Part::file(name, file));
        self
    }

    pub fn parts_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Part> + 'a {
        self.parts.iter().filter(move |p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Multipart(MultipartPayload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_multipart(path: impl Into<String>, payload: MultipartPayload) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: RequestBody::Multipart(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Response of the configuration endpoint. Its shape is unknown to this
/// crate; interpreting it is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigResponse(HttpResponse);

impl ConfigResponse {
    pub fn status(&self) -> u16 {
        self.0.status
    }

    pub fn body(&self) -> &Bytes {
        &self.0.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.0.body)
    }

    pub fn into_inner(self) -> HttpResponse {
        self.0
    }
}

impl From<HttpResponse> for ConfigResponse {
    fn from(response: HttpResponse) -> Self {
        Self(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_handle_from_path_uses_last_component() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.csv");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"a,b\n1,2\n").expect("write");

        let handle = FileHandle::from_path(&path).await.expect("load");
        assert_eq!(handle.file_name, "report.csv");
        assert_eq!(handle.content, Bytes::from_static(b"a,b\n1,2\n"));
    }

    #[tokio::test]
    async fn file_handle_from_missing_path_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = FileHandle::from_path(dir.path().join("nope.bin")).await;
        assert!(result.is_err());
    }

    #[test]
    fn config_response_exposes_raw_and_json_views() {
        let response = ConfigResponse::from(HttpResponse::new(200, r#"{"theme":"dark"}"#));
        assert_eq!(response.status(), 200);
        assert_eq!(response.text(), r#"{"theme":"dark"}"#);

        let value: serde_json::Value = response.json().expect("json");
        assert_eq!(value["theme"], "dark");
    }

    #[test]
    fn config_response_json_reports_malformed_body() {
        let response = ConfigResponse::from(HttpResponse::new(200, "not json"));
        assert!(response.json::<serde_json::Value>().is_err());
    }
}
