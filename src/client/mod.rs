//! Search client contract with the remote place search service.
//!
//! # Modules
//!
//! - [`request`]: query validation, request construction, response interpretation
//! - [`payload`]: wire payload types and normalization into domain results
//!
//! The client never performs I/O itself. It hands a [`SearchRequest`] to the
//! plugin runtime and later interprets the raw status and body that come back.

pub mod payload;
pub mod request;

pub use request::{RequestTicket, SearchClient, SearchRequest};
