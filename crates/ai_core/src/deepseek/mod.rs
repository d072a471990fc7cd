//! DeepSeek inference engine implementation
//!
//! Talks to the OpenAI-compatible `/chat/completions` endpoint.

mod client;

pub use client::DeepSeekInferenceEngine;
