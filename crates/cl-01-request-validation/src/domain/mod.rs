//! Domain layer: rule tables, typed requests and the three validators.

pub mod authorization;
pub mod config;
pub mod errors;
pub mod request;
pub mod rules;
pub mod schema;
pub mod semantic;

pub use authorization::authorize_write;
pub use config::{ValidationConfig, BASE58_ALPHABET};
pub use errors::*;
pub use request::*;
pub use rules::ValidationRules;
pub use schema::{check_schema, json_type_name, operation_name_of, TypedRequest};
pub use semantic::check_semantics;
