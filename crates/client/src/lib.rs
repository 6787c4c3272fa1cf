pub mod config_fetch;
pub mod error;
pub mod form;
pub mod sink;
pub mod testing;
pub mod transport;
pub mod types;

pub use config_fetch::ConfigService;
pub use error::{ClientError, ClientResult};
pub use form::SubmissionForm;
pub use sink::{Notification, RecordingSink, SubmissionSink, TracingSink};
pub use transport::{ReqwestTransport, Transport};
pub use types::*;
