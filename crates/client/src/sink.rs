use crate::error::ClientError;
use crate::types::HttpResponse;
use std::sync::Mutex;
use tracing::{info, warn};

/// Receives the outcome of a form submission.
pub trait SubmissionSink: Send + Sync {
    fn succeeded(&self, response: &HttpResponse);
    fn failed(&self, error: &ClientError);
}

/// Reports outcomes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn succeeded(&self, response: &HttpResponse) {
        info!(
            status = response.status,
            bytes = response.body.len(),
            "Form submitted"
        );
    }

    fn failed(&self, error: &ClientError) {
        warn!("Form submission failed: {} ({})", error, error.user_message());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Succeeded { status: u16 },
    Failed { message: String },
}

impl Notification {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failed { .. })
    }
}

/// Keeps every notification it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn failures(&self) -> usize {
        self.lock().iter().filter(|n| n.is_failure()).count()
    }

    pub fn successes(&self) -> usize {
        self.lock().iter().filter(|n| !n.is_failure()).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        // A poisoned lock still holds a usable list.
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SubmissionSink for RecordingSink {
    fn succeeded(&self, response: &HttpResponse) {
        TracingSink.succeeded(response);
        self.lock().push(Notification::Succeeded {
            status: response.status,
        });
    }

    fn failed(&self, error: &ClientError) {
        TracingSink.failed(error);
        self.lock().push(Notification::Failed {
            message: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.succeeded(&HttpResponse::new(201, "created"));
        sink.failed(&ClientError::status_error(500, "boom"));

        assert_eq!(
            sink.notifications(),
            vec![
                Notification::Succeeded { status: 201 },
                Notification::Failed {
                    message: "Server returned 500: boom".to_string()
                },
            ]
        );
        assert_eq!(sink.successes(), 1);
        assert_eq!(sink.failures(), 1);
    }
}
