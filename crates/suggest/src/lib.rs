//! Gift-idea generation.
//!
//! - [`client`] — reqwest wrapper for the OpenAI-compatible completion
//!   backend, bounded by a conservative timeout.
//! - [`generator`] — orchestrates one backend call per request, parses and
//!   normalizes the result, and degrades to the deterministic fallback
//!   templates on any failure. The generator itself never fails.

pub mod client;
pub mod generator;

pub use client::{CompletionApi, CompletionConfig, CompletionError};
pub use generator::{GiftIdeaService, IdeaBackend, Suggestions};
