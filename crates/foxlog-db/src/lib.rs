//! # foxlog-db
//!
//! MongoDB operations that provision the error-log collection.
//!
//! The sequence lives in [`bootstrap`] and talks to the server only through
//! the [`SchemaTarget`] trait. [`MongoTarget`] is the driver-backed
//! implementation; tests substitute an in-memory one.
//!
//! Connection and privilege failures abort a run. "Already exists" answers
//! from the server are successes, and a failed seed insert is only reported.

pub mod bootstrap;
pub mod connect;
pub mod error;
pub mod mongo;
pub mod report;
pub mod retry;
pub mod target;

#[cfg(test)]
mod test_support;

pub use bootstrap::{BootstrapOptions, Bootstrapper};
pub use connect::connect;
pub use error::DatabaseError;
pub use mongo::MongoTarget;
pub use report::{BootstrapReport, IndexSummary, Step, StepEvent, StepOutcome};
pub use retry::RetryConfig;
pub use target::SchemaTarget;
