// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which decodes the text of a
//! configuration document into a raw [`ConfigValue`] tree. Keys come out of the
//! parser as the document spells them; canonicalization happens afterwards in the
//! store that loads the document.

use crate::domain::ConfigValue;
use std::path::Path;

/// The error a parser reports when a document cannot be decoded.
pub type ParseError = Box<dyn std::error::Error + Send + Sync>;

/// A trait for decoding configuration documents.
///
/// # Examples
///
/// ```rust
/// use envcfg::domain::ConfigValue;
/// use envcfg::ports::{ConfigParser, ParseError};
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn parse(&self, content: &str) -> Result<Option<ConfigValue>, ParseError> {
///         let entries: Vec<(&str, &str)> = content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .collect();
///         if entries.is_empty() {
///             return Ok(None);
///         }
///         Ok(Some(ConfigValue::mapping(entries)))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["conf"]
///     }
/// }
///
/// let value = LineParser.parse("a=1\nb=2").unwrap().unwrap();
/// assert_eq!(value.as_mapping().unwrap().len(), 2);
/// ```
pub trait ConfigParser {
    /// Decodes `content` into a raw tree.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - The decoded document
    /// * `Ok(None)` - The document is empty or null
    /// * `Err(ParseError)` - The document is malformed
    fn parse(&self, content: &str) -> Result<Option<ConfigValue>, ParseError>;

    /// Returns the file extensions supported by this parser, without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Returns true if the extension of `path` is one this parser supports.
    ///
    /// Matching is case-insensitive. A path without an extension never matches.
    fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
