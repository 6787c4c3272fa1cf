//! Test doubles for code built on this crate.
//!
//! [`FakeTransport`] records every request it is given and answers with a
//! scripted outcome, so units can be exercised without a server.

use crate::error::{ClientError, ClientResult};
use crate::transport::Transport;
use crate::types::{HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::sync::Mutex;

enum Outcome {
    Respond(HttpResponse),
    FailStatus(u16),
}

pub struct FakeTransport {
    outcome: Outcome,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn responding(response: HttpResponse) -> Self {
        Self {
            outcome: Outcome::Respond(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok() -> Self {
        Self::responding(HttpResponse::new(200, "{}"))
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self {
            outcome: Outcome::FailStatus(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        match &self.outcome {
            Outcome::Respond(response) => Ok(response.clone()),
            Outcome::FailStatus(status) => Err(ClientError::status_error(*status, "fake failure")),
        }
    }
}
