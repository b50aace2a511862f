//! # Request Handler Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Drives each request to one terminal state. Reads are answered straight
//! from the document store. Writes are authorized, handed to ordering, and
//! finished by the commit callback, which is the only place the store is
//! mutated.
//!
//! ## State Machine
//!
//! ```text
//! [Received] ──schema/semantic──→ [Validated] ──read──→ [ReadOk(found | absent)]
//!     │                               │
//!     └──→ [Rejected]                 └──write──→ authorize ──→ [Submitted]
//!                                                    │              │
//!                                                    └→ [Rejected]  └──commit──→ [Committed]
//!                                                                   └──store refuses──→ [Aborted]
//! ```
//!
//! | Terminal State | Reply |
//! |----------------|-------|
//! | `Committed` | `REPLY` with `seqNo`, `txnMetadata` and the stored document |
//! | `ReadOk(found)` | `REPLY` with `seqNo` and the stored document |
//! | `ReadOk(absent)` | `REPLY` with `seqNo: null`, `data: null` |
//! | `Rejected` (schema, semantic) | `REQNACK` |
//! | `Rejected` (authorization, conflict), aborted | `REJECT` |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Ordering | `OrderingService` | `seqNo` and commit time for writes |
//! | Role management | `RoleProvider` | Submitter role |
//! | Subsystem 1 | `RequestValidationApi` | Schema, semantic, authorization |
//! | Subsystem 2 | `DocumentStore` | Committed documents |
//!
//! ## Module Structure
//!
//! ```text
//! domain/config.rs        - HandlerConfig
//! domain/correlation.rs   - CorrelationId (UUID v7)
//! domain/commit.rs        - OrderingRequest, CommitNotice
//! domain/reply.rs         - RequestOutcome, reply and nack assembly
//! domain/errors.rs        - HandlerError, OrderingError, RoleLookupError
//! ports/inbound.rs        - RequestHandlerApi
//! ports/outbound.rs       - OrderingService, RoleProvider
//! adapters/pending.rs     - PendingCommits continuations + cleanup task
//! adapters/local_orderer.rs - LocalOrderer (in-process commit stream)
//! adapters/roles.rs       - StaticRoleProvider
//! service.rs              - RequestHandler, CommitApplier, commit loop
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{cleanup_task, LocalOrderer, PendingCommits, StaticRoleProvider};
pub use domain::*;
pub use ports::*;
pub use service::{run_commit_loop, CommitApplier, RequestHandler};
