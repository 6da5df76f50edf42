//! ENML Content Converter
//!
//! This library converts note content between plain text, HTML and ENML, the
//! restricted XML dialect notes are stored in. HTML is sanitized against an
//! allow list on its way into ENML, so the output only ever holds the elements
//! and attributes the format permits.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `parser`: lenient HTML5 parsing using html5ever
//! - `dom`: owned markup tree lowered from the parser's DOM
//! - `elements`: block, inline, permitted and prohibited tag tables
//! - `text`: whitespace-normalizing plain-text extraction
//! - `sanitizer`: allow-list sanitization into an `<en-note>` tree
//! - `serializer`: pretty-printed XML output and the ENML preamble
//! - `content`: the conversion API tying the above together
//! - `search`: note search expressions in the service's grammar
//!
//! # Examples
//!
//! ```rust
//! use enml_content::{html_from_restricted_xml, Content};
//!
//! let enml = Content::plain("Shopping\n\nmilk & eggs").to_enml();
//! assert!(enml.as_str().contains("<div>milk &amp; eggs</div>"));
//!
//! let html = html_from_restricted_xml(enml.as_str()).unwrap();
//! assert_eq!(html, "<div>\n Shopping\n</div>\n<div>\n <br/>\n</div>\n<div>\n milk &amp; eggs\n</div>");
//! ```
//!
//! # Logging
//!
//! Conversions emit `tracing` events (`debug` for each conversion, `warn` for
//! truncated input and ENML without `<en-note>`). The library never installs a
//! subscriber.

pub mod content;
pub mod dom;
pub mod elements;
pub mod error;
pub mod parser;
pub mod sanitizer;
pub mod search;
pub mod serializer;
pub mod text;

// Re-export main types for convenience
pub use content::{
    Content, ContentConverter, ConversionOptions, Format, html, html_from_restricted_xml, plain,
    restricted_xml,
};
pub use error::{ConversionError, Result};
pub use parser::parse_html;
pub use sanitizer::Sanitizer;
pub use search::{NameMatch, NoteSearch, SearchTime, convert_timestamp};
