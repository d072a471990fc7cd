//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod amap_route_adapter;
mod deepseek_inference_adapter;

pub use amap_route_adapter::AmapRouteAdapter;
pub use deepseek_inference_adapter::DeepSeekInferenceAdapter;
