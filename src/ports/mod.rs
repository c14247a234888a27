// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that file-backed stores use
//! to decode documents. They are implemented by adapters in the adapters layer.

pub mod parser;

// Re-export commonly used types
pub use parser::{ConfigParser, ParseError};
