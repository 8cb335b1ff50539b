//! Core correction modules
//!
//! Contains the request types, prompt construction, the Gemini transport
//! and the response normalization that make up the correction pipeline.

pub mod gemini;
pub mod pipeline;
pub mod prompt;
pub mod request;
pub mod response;
pub mod tone;

pub use pipeline::Corrector;
pub use request::{CorrectionRequest, CorrectionResult};
pub use tone::Tone;
