//! Plain-text extraction
//!
//! Walks a markup tree in document order (pre-order, depth-first) and produces
//! the text a reader would see, one line per block element.
//!
//! # Whitespace Model
//!
//! Whitespace follows CSS's collapsible-whitespace rules closely enough to
//! merge text that markup splits into several runs:
//!
//! - Text consisting only of whitespace contributes nothing
//! - Any run of spaces, tabs, carriage returns and line feeds becomes one space
//! - A fragment loses its leading whitespace when it is the first one emitted
//!   at its level, or when the previous fragment already ends in a space
//! - Every block element (see [`crate::elements::BLOCK_ELEMENTS`]) is
//!   followed by exactly one `\n`
//!
//! Inside `<pre>` none of this applies: text is emitted verbatim.
//!
//! # Examples
//!
//! ```rust
//! use enml_content::parser::parse_document;
//! use enml_content::text::document_text;
//!
//! let doc = parse_document(r##"<p>1 <a href="#"><b>2</b> 3</a>.</p>"##, 1000);
//! assert_eq!(document_text(&doc), "1 2 3.\n");
//! ```

use regex::Regex;
use std::sync::OnceLock;

use crate::dom::{Document, Element, Node};
use crate::elements::is_block;

/// Extract the plain text of a single node
///
/// An element root contributes its content only; the trailing line break of a
/// block element is added by its parent. A `<pre>` root starts in
/// preformatted mode.
pub fn plain_text(node: &Node) -> String {
    match node {
        Node::Text(text) => {
            let mut extractor = Extractor::new(false);
            extractor.push_text(text);
            extractor.finish()
        }
        Node::Element(element) => element_text(element, false),
    }
}

/// Extract the plain text of a whole document
pub fn document_text(document: &Document) -> String {
    children_text(&document.children, false)
}

fn element_text(element: &Element, pre: bool) -> String {
    children_text(&element.children, pre || element.name == "pre")
}

fn children_text(children: &[Node], pre: bool) -> String {
    let mut extractor = Extractor::new(pre);
    for child in children {
        match child {
            Node::Text(text) => extractor.push_text(text),
            Node::Element(element) => {
                let text = element_text(element, pre);
                extractor.push_element(&text, is_block(&element.name));
            }
        }
    }
    extractor.finish()
}

/// Accumulates the fragments emitted at one level of the tree
struct Extractor {
    pre: bool,
    output: String,
    /// Whether the most recent fragment ended in a space; `None` until
    /// something has been emitted at this level
    last_ends_in_space: Option<bool>,
}

impl Extractor {
    fn new(pre: bool) -> Self {
        Self {
            pre,
            output: String::new(),
            last_ends_in_space: None,
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        if self.pre {
            self.emit(text);
            return;
        }

        let normalized = normalize_whitespace(text);
        let fragment = match self.last_ends_in_space {
            None | Some(true) => normalized.trim_start(),
            Some(false) => normalized.as_str(),
        };
        self.emit(fragment);
    }

    fn push_element(&mut self, text: &str, block: bool) {
        let fragment = if !self.pre && self.last_ends_in_space == Some(true) {
            text.trim_start()
        } else {
            text
        };
        self.emit(fragment);

        if block {
            self.emit("\n");
        }
    }

    fn emit(&mut self, fragment: &str) {
        // Empty elements (<br>, <img>, ...) leave the spacing state alone
        if fragment.is_empty() {
            return;
        }
        self.output.push_str(fragment);
        self.last_ends_in_space = Some(fragment.ends_with(' '));
    }

    fn finish(self) -> String {
        self.output
    }
}

/// Collapse HTML whitespace in a text run
///
/// A leading whitespace run becomes a single space, and so does every other
/// run of spaces, tabs, carriage returns and line feeds. Other Unicode spaces
/// (such as U+00A0) are content and stay untouched.
///
/// ```rust
/// use enml_content::text::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("\n  Once upon\ta\r\ntime  "), " Once upon a time ");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RUN: OnceLock<Option<Regex>> = OnceLock::new();

    match WHITESPACE_RUN.get_or_init(|| Regex::new(r"[ \t\r\n]+").ok()) {
        Some(regex) => regex.replace_all(text, " ").into_owned(),
        None => text.to_string(),
    }
}
