//! JSON extractors whose rejections are [`handler::Error`]s.
//!
//! [`handler::Error`]: crate::handler::Error

mod enhanced_json;
mod validated_json;

pub use self::enhanced_json::Json;
pub use self::validated_json::ValidateJson;
