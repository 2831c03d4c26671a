//! Request and response payloads for the conversion API.
//!
//! These are transient wire types only; nothing here is persisted. They
//! serialize naturally as JSON via `serde`.

pub mod request;
pub mod response;
