//! # idlescape-fetch — Document loading for the Idlescape data store
//!
//! Fills an [`idlescape_core::DataStore`] from the three reference documents:
//!   - **HTTP(S)** from the extraction repository (default)
//!   - **Local directory** holding a snapshot of the same files
//!
//! Loading is fire-and-forget from the caller's point of view:
//!   - The three documents are fetched concurrently
//!   - Each collection appears in the store as soon as its document is indexed
//!   - Failures are logged and leave the collection absent (no retry)
//!
//! ```text
//! DocumentSource ──fetch──▶ raw JSON ──ingest──▶ staged DataStore ──merge──▶ SharedStore
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod loader;
pub mod source;
pub mod telemetry;

pub use error::FetchError;
pub use loader::{LoadReport, Loader, create_default, load_default};
pub use source::{DirSource, DocumentSource, HttpSource};
pub use telemetry::{env_filter, init_tracing};
