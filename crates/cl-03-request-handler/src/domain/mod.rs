//! Domain layer: handler configuration, commit messages, reply assembly.

pub mod commit;
pub mod config;
pub mod correlation;
pub mod errors;
pub mod reply;

pub use commit::{CommitNotice, OrderingRequest};
pub use config::{HandlerConfig, HandlerConfigError};
pub use correlation::CorrelationId;
pub use errors::{HandlerError, OrderingError, RegisterError, RoleLookupError};
pub use reply::{error_message, read_reply, write_reply, RequestOutcome};
