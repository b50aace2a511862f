//! # Request Validation Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Turns an untyped request body into a [`ValidatedRequest`] or a
//! [`Rejection`] before anything reaches ordering. Every replica runs the same
//! pure functions over the same immutable rule table, so every replica rejects
//! the same input with the same message.
//!
//! ## Pipeline
//!
//! ```text
//! raw JSON ──schema──→ TypedRequest ──semantic──→ ValidatedRequest
//!    │                      │                          │
//!    └── SchemaError        └── SemanticError          └── (writes) authorize ──→ AuthorizationError
//! ```
//!
//! | Stage | Function | Rejection Kind |
//! |-------|----------|----------------|
//! | Shape and JSON types | `check_schema()` | `Schema` |
//! | Alphabet, version grammar, name, doc type | `check_semantics()` | `Semantic` |
//! | Role privilege, namespace ownership | `authorize_write()` | `Authorization` |
//!
//! Type checks always run before value checks: a request with both a
//! mistyped field and a bad value is reported as a schema error.
//!
//! ## Rejection Messages
//!
//! Rendered as `validation error [<Operation>]: <reason>`:
//!
//! - `missed fields - dest, version`
//! - `expected type 'string', got 'number' (version=2.0)`
//! - `should not contain the following chars ['_'] (dest=wrong_did)`
//! - `Invalid version: 'asd'`
//!
//! ## Module Structure
//!
//! ```text
//! domain/config.rs        - ValidationConfig (serde, env overrides)
//! domain/rules.rs         - ValidationRules, built once, shared as Arc
//! domain/request.rs       - RequestHeader, Operation, ValidatedRequest
//! domain/schema.rs        - Schema Validator
//! domain/semantic.rs      - Semantic Validator
//! domain/authorization.rs - Authorization Checker
//! domain/errors.rs        - SchemaError, SemanticError, AuthorizationError, Rejection
//! ports/inbound.rs        - RequestValidationApi
//! service.rs              - RequestValidator
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::RequestValidator;
