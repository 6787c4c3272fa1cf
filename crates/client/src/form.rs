use crate::sink::SubmissionSink;
use crate::transport::Transport;
use crate::types::{FileHandle, FormState, HttpRequest, MultipartPayload};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Placeholder path; deployments point this at their real upload route.
pub const DEFAULT_SUBMIT_PATH: &str = "/your-api-endpoint";
pub const NAME_FIELD: &str = "name";
pub const DEFAULT_FILE_FIELD: &str = "source_files";

/// A name field plus a file selection, posted as one multipart request.
///
/// Outcomes go to the [`SubmissionSink`]; nothing is returned to the caller
/// and the selection is left untouched whatever the result.
pub struct SubmissionForm {
    state: FormState,
    files: Vec<FileHandle>,
    endpoint: String,
    file_field: String,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn SubmissionSink>,
}

impl SubmissionForm {
    pub fn new(transport: Arc<dyn Transport>, sink: Arc<dyn SubmissionSink>) -> Self {
        Self {
            state: FormState::default(),
            files: Vec::new(),
            endpoint: DEFAULT_SUBMIT_PATH.to_string(),
            file_field: DEFAULT_FILE_FIELD.to_string(),
            transport,
            sink,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Key used for every file part. Some backends expect `source_files[]`.
    pub fn with_file_field(mut self, field: impl Into<String>) -> Self {
        self.file_field = field.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.name = name.into();
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    /// Replaces the whole selection.
    pub fn select_files(&mut self, files: Vec<FileHandle>) {
        self.files = files;
    }

    pub fn payload(&self) -> MultipartPayload {
        self.files.iter().fold(
            MultipartPayload::new().text(NAME_FIELD, self.state.name.clone()),
            |payload, file| payload.file(self.file_field.as_str(), file),
        )
    }

    pub async fn submit(&self) {
        send_and_report(
            self.transport.clone(),
            self.sink.clone(),
            self.endpoint.clone(),
            self.payload(),
        )
        .await;
    }

    /// Runs the submission on its own task. The form can be edited while the
    /// request is in flight; the request uses the values at the time of the
    /// call. Dropping the handle does not cancel it.
    pub fn spawn_submit(&self) -> JoinHandle<()> {
        let transport = self.transport.clone();
        let sink = self.sink.clone();
        let endpoint = self.endpoint.clone();
        let payload = self.payload();
        tokio::spawn(async move {
            send_and_report(transport, sink, endpoint, payload).await;
        })
    }
}

async fn send_and_report(
    transport: Arc<dyn Transport>,
    sink: Arc<dyn SubmissionSink>,
    endpoint: String,
    payload: MultipartPayload,
) {
    debug!(endpoint = %endpoint, parts = payload.len(), "Submitting form");
    match transport
        .send(HttpRequest::post_multipart(endpoint, payload))
        .await
    {
        Ok(response) => sink.succeeded(&response),
        Err(e) => sink.failed(&e),
    }
}
