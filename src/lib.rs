//! Polish Library
//!
//! Text correction through the Gemini generative-language API: prompt
//! construction, the HTTP transport, response normalization, and the
//! credential and configuration plumbing around them.

pub mod clipboard;
pub mod config;
pub mod core;
pub mod credential;
pub mod error;
pub mod output;

pub use crate::core::{CorrectionRequest, CorrectionResult, Corrector, Tone};
pub use error::{PolishError, PolishResult};
