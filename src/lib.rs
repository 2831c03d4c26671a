//! doc2md — a thin HTTP façade over a document-to-Markdown conversion
//! engine.
//!
//! The service accepts a file upload or a URL, validates the request,
//! hands the bytes to the [`engine::DocumentConverter`], and returns the
//! resulting Markdown. Parsing itself is delegated to third-party
//! extraction crates behind the engine boundary; what lives here is
//! request validation, temp-file lifecycle, timeout enforcement, and
//! route wiring.

pub mod config;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
