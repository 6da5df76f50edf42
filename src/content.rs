//! Note content conversion
//!
//! Note bodies travel in three formats: plain text, HTML and ENML (the
//! service's restricted XHTML subset wrapped in `<en-note>`). This module
//! converts between them.
//!
//! | from \ to | plain                | HTML                       | ENML              |
//! |-----------|----------------------|----------------------------|-------------------|
//! | plain     | unchanged            | one `<p>` per line         | one `<div>` per line |
//! | HTML      | text extraction      | unchanged                  | sanitized         |
//! | ENML      | text extraction      | `<en-note>` content        | unchanged         |
//!
//! Only ENML → HTML can fail: the input must contain an `<en-note>` element.
//! HTML → plain → HTML is lossy; markup does not come back.
//!
//! # Examples
//!
//! ```rust
//! use enml_content::Content;
//!
//! let html = Content::html(r#"<p class="lead">Hello <b>world</b></p><script>x()</script>"#);
//!
//! let enml = html.to_enml();
//! assert!(enml.as_str().contains("<en-note>"));
//! assert!(!enml.as_str().contains("class="));
//! assert!(!enml.as_str().contains("script"));
//!
//! assert_eq!(enml.to_plain().as_str(), "Hello world\n");
//! ```

use std::fmt;

use crate::dom::{Document, Node};
use crate::error::{ConversionError, Result};
use crate::parser::parse_document;
use crate::sanitizer::Sanitizer;
use crate::serializer::{EN_NOTE, ENML_DTD_URL, enml_preamble, text_to_string, to_pretty_string};
use crate::text::document_text;

use quick_xml::escape::partial_escape;

/// Maximum element nesting depth kept from parsed input
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Format of a piece of note content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Plain text
    Plain,
    /// HTML markup
    Html,
    /// ENML, the restricted XML note format
    Enml,
}

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// System identifier written into the ENML doctype
    pub doctype_url: String,
    /// Spaces per nesting level in pretty-printed output
    pub indent: usize,
    /// Elements nested deeper than this are dropped from parsed input
    pub max_depth: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            doctype_url: ENML_DTD_URL.to_string(),
            indent: 1,
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

/// Converter between plain text, HTML and ENML
///
/// The converter holds configuration only; every call parses and owns its own
/// tree, so one converter can be shared freely.
///
/// # Usage
///
/// ```rust
/// use enml_content::content::{ContentConverter, ConversionOptions};
///
/// let converter = ContentConverter::with_options(ConversionOptions {
///     indent: 2,
///     ..Default::default()
/// });
///
/// let enml = converter.enml_from_html("<p>1</p><hr><br><p>2</p>");
/// assert!(enml.contains("<br/>"));
/// assert!(enml.contains("<hr/>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentConverter {
    options: ConversionOptions,
    sanitizer: Sanitizer,
}

impl ContentConverter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    pub fn with_options(options: ConversionOptions) -> Self {
        Self {
            options,
            sanitizer: Sanitizer::new(),
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Parse HTML or ENML into an owned tree
    pub fn parse(&self, markup: &str) -> Document {
        parse_document(markup, self.options.max_depth)
    }

    /// Extract plain text from HTML or ENML
    pub fn plain_from_markup(&self, markup: &str) -> String {
        let text = document_text(&self.parse(markup));
        tracing::debug!(
            input_len = markup.len(),
            output_len = text.len(),
            "Extracted plain text"
        );
        text
    }

    /// Wrap each line of plain text in a `<p>` element
    ///
    /// ```rust
    /// use enml_content::content::ContentConverter;
    ///
    /// let html = ContentConverter::new().html_from_plain("one\ntwo");
    /// assert_eq!(html, "<p>one</p>\n<p>two</p>");
    /// ```
    pub fn html_from_plain(&self, text: &str) -> String {
        split_lines(text)
            .into_iter()
            .map(|line| format!("<p>{}</p>", partial_escape(line)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build an ENML document with one `<div>` per line of plain text
    ///
    /// Blank lines become `<div><br/></div>` so they keep their height.
    pub fn enml_from_plain(&self, text: &str) -> String {
        let mut lines = vec![enml_preamble(&self.options.doctype_url), format!("<{EN_NOTE}>")];
        for line in split_lines(text) {
            if line.trim().is_empty() {
                lines.push("<div><br/></div>".to_string());
            } else {
                lines.push(format!("<div>{}</div>", partial_escape(line)));
            }
        }
        lines.push(format!("</{EN_NOTE}>"));

        let enml = lines.join("\n");
        tracing::debug!(
            input_len = text.len(),
            output_len = enml.len(),
            "Built ENML from plain text"
        );
        enml
    }

    /// Sanitize HTML into an ENML document
    pub fn enml_from_html(&self, html: &str) -> String {
        let enml = self.enml_from_document(&self.parse(html));
        tracing::debug!(
            input_len = html.len(),
            output_len = enml.len(),
            "Sanitized HTML into ENML"
        );
        enml
    }

    /// Sanitize an already parsed tree and serialize it with the ENML preamble
    pub fn enml_from_document(&self, document: &Document) -> String {
        let note = self.sanitizer.sanitize(document);
        format!(
            "{}\n{}",
            enml_preamble(&self.options.doctype_url),
            to_pretty_string(&note, self.options.indent)
        )
    }

    /// Extract the content of an ENML document as HTML
    ///
    /// Every child of `<en-note>` is written on its own line; the preamble and
    /// the `<en-note>` wrapper are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::Format` when the input has no `<en-note>`
    /// element.
    pub fn html_from_enml(&self, enml: &str) -> Result<String> {
        let document = self.parse(enml);
        let Some(note) = document.find(EN_NOTE) else {
            tracing::warn!(input_len = enml.len(), "ENML input has no <en-note> element");
            return Err(ConversionError::Format(format!(
                "ENML does not have <{EN_NOTE}> tag"
            )));
        };

        let html = note
            .children
            .iter()
            .map(|child| match child {
                Node::Element(element) => to_pretty_string(element, self.options.indent)
                    .trim()
                    .to_string(),
                Node::Text(text) => text_to_string(text),
            })
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        tracing::debug!(
            input_len = enml.len(),
            output_len = html.len(),
            "Extracted HTML from ENML"
        );
        Ok(html)
    }

    /// Convert content to the given format
    ///
    /// # Errors
    ///
    /// Fails only when converting ENML without an `<en-note>` element to
    /// HTML.
    pub fn convert(&self, content: &Content, target: Format) -> Result<Content> {
        let text = match (content.format, target) {
            (Format::Plain, Format::Plain)
            | (Format::Html, Format::Html)
            | (Format::Enml, Format::Enml) => content.text.clone(),
            (Format::Plain, Format::Html) => self.html_from_plain(&content.text),
            (Format::Plain, Format::Enml) => self.enml_from_plain(&content.text),
            (Format::Html | Format::Enml, Format::Plain) => self.plain_from_markup(&content.text),
            (Format::Html, Format::Enml) => self.enml_from_html(&content.text),
            (Format::Enml, Format::Html) => self.html_from_enml(&content.text)?,
        };
        Ok(Content {
            format: target,
            text,
        })
    }
}

/// A piece of note content tagged with its format
///
/// Each conversion returns a new `Content`; nothing is cached between
/// formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Content {
    format: Format,
    text: String,
}

impl Content {
    pub fn new(format: Format, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
        }
    }

    /// Plain text content
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Format::Plain, text)
    }

    /// HTML content
    pub fn html(text: impl Into<String>) -> Self {
        Self::new(Format::Html, text)
    }

    /// ENML content
    pub fn enml(text: impl Into<String>) -> Self {
        Self::new(Format::Enml, text)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Convert to plain text
    pub fn to_plain(&self) -> Content {
        let text = match self.format {
            Format::Plain => self.text.clone(),
            Format::Html | Format::Enml => ContentConverter::new().plain_from_markup(&self.text),
        };
        Content::plain(text)
    }

    /// Convert to HTML
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::Format` for ENML without an `<en-note>`
    /// element.
    pub fn to_html(&self) -> Result<Content> {
        ContentConverter::new().convert(self, Format::Html)
    }

    /// Convert to ENML
    pub fn to_enml(&self) -> Content {
        let converter = ContentConverter::new();
        let text = match self.format {
            Format::Plain => converter.enml_from_plain(&self.text),
            Format::Html => converter.enml_from_html(&self.text),
            Format::Enml => self.text.clone(),
        };
        Content::enml(text)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Content {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Plain text of any content
pub fn plain(content: &Content) -> Content {
    content.to_plain()
}

/// HTML rendering of any content
pub fn html(content: &Content) -> Result<Content> {
    content.to_html()
}

/// ENML rendering of any content
pub fn restricted_xml(content: &Content) -> Content {
    content.to_enml()
}

/// HTML content of an ENML document
pub fn html_from_restricted_xml(enml: &str) -> Result<String> {
    ContentConverter::new().html_from_enml(enml)
}

/// Split text on `\n`, `\r\n` and `\r`
///
/// A trailing line break does not produce an empty last line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(index) => {
                lines.push(&rest[..index]);
                let skip = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[index + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}
