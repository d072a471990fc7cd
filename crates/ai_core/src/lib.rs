//! AI Core - Chat-completion client
//!
//! Provides the inference abstraction used for itinerary generation and an
//! implementation for DeepSeek's OpenAI-compatible chat-completions API.

pub mod config;
pub mod deepseek;
pub mod error;
pub mod ports;

pub use config::InferenceConfig;
pub use deepseek::DeepSeekInferenceEngine;
pub use error::InferenceError;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
