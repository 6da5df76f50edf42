//! HTML5 parser using html5ever
//!
//! This module provides the lenient markup parser every conversion starts
//! from. Both HTML and ENML input go through it: html5ever implements the
//! WHATWG HTML5 parsing algorithm, so malformed markup, unknown elements such
//! as `<en-note>` and XML-only constructs are all recovered from the same way
//! a browser would.
//!
//! # Examples
//!
//! ```rust
//! use enml_content::parser::parse_document;
//!
//! // Missing closing tags are fine
//! let doc = parse_document("<html><body><h1>Hello", 1000);
//! assert!(doc.find("h1").is_some());
//!
//! // ENML parses like any other markup
//! let doc = parse_document("<en-note><div>note</div></en-note>", 1000);
//! assert!(doc.find("en-note").is_some());
//! ```
//!
//! # Notes
//!
//! - `<?xml ...?>` declarations become comments and are dropped when lowering
//! - A single line feed directly after `<pre>` is discarded, as HTML5 requires
//! - Parsing is single-threaded, synchronous and never fails

use html5ever::parse_document as parse_html_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;

use crate::dom::Document;

/// Parse markup into an html5ever DOM tree
///
/// The parser never rejects input; broken markup is repaired following the
/// HTML5 tree construction rules.
///
/// # Examples
///
/// ```rust
/// use enml_content::parser::parse_html;
///
/// let dom = parse_html("<p>Hello <b>world</p>");
/// assert!(!dom.document.children.borrow().is_empty());
/// ```
pub fn parse_html(markup: &str) -> RcDom {
    parse_html_document(RcDom::default(), Default::default()).one(markup)
}

/// Parse markup into the crate's owned tree
///
/// Elements nested deeper than `max_depth` are dropped (see
/// [`Document::from_rcdom`]).
pub fn parse_document(markup: &str, max_depth: usize) -> Document {
    let dom = parse_html(markup);
    Document::from_rcdom(&dom, max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;
    use proptest::prelude::*;

    const DEPTH: usize = 1000;

    #[test]
    fn test_parse_simple_html() {
        let doc = parse_document("<html><body><h1>Hello</h1></body></html>", DEPTH);
        let h1 = doc.find("h1").expect("Should parse simple HTML");
        assert_eq!(h1.children, vec![Node::text("Hello")]);
    }

    #[test]
    fn test_parse_malformed_html() {
        // Missing closing tags
        let doc = parse_document("<html><body><h1>Hello", DEPTH);
        assert!(doc.find("h1").is_some(), "Should handle malformed HTML");
    }

    #[test]
    fn test_parse_empty_input() {
        // html5ever still synthesizes html/head/body
        let doc = parse_document("", DEPTH);
        assert!(doc.find("body").is_some());
    }

    #[test]
    fn test_parse_html_entities() {
        let doc = parse_document("<p>&lt;tag&gt; &amp; &quot;quotes&quot;</p>", DEPTH);
        let p = doc.find("p").expect("paragraph");
        assert_eq!(p.children, vec![Node::text("<tag> & \"quotes\"")]);
    }

    #[test]
    fn test_parse_misnested_tags() {
        let doc = parse_document("<b><i>text</b></i>", DEPTH);
        assert!(doc.find("b").is_some(), "Should handle misnested tags");
        assert!(doc.find("i").is_some());
    }

    #[test]
    fn test_parse_fragment_gets_body() {
        let doc = parse_document("<div><p>Content</p></div>", DEPTH);
        let body = doc.find("body").expect("body is synthesized");
        assert_eq!(body.children.len(), 1);
    }

    #[test]
    fn test_parse_enml_envelope() {
        let enml = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
            "<!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n",
            "<en-note><div>one</div><div><br/></div></en-note>",
        );
        let doc = parse_document(enml, DEPTH);
        let note = doc.find("en-note").expect("en-note element");
        assert_eq!(note.children.len(), 2);
        assert!(note.find("br").is_some());
    }

    #[test]
    fn test_parse_pre_drops_first_line_feed() {
        let doc = parse_document("<pre>\n  a\n</pre>", DEPTH);
        let pre = doc.find("pre").expect("pre");
        assert_eq!(pre.children, vec![Node::text("  a\n")]);
    }

    #[test]
    fn test_parse_unicode() {
        let doc = parse_document("<p>\u{4e16}\u{754c} \u{1F600}</p>", DEPTH);
        let p = doc.find("p").expect("paragraph");
        assert_eq!(p.children, vec![Node::text("\u{4e16}\u{754c} \u{1F600}")]);
    }

    proptest! {
        #[test]
        fn prop_malformed_html_no_crash(
            tag in prop::sample::select(vec!["div", "p", "span", "h1", "ul", "li", "table", "tr", "td"]),
            content in "[a-zA-Z0-9 ]{0,100}",
            close_tag in prop::bool::ANY,
            add_invalid_nesting in prop::bool::ANY,
        ) {
            let mut html = format!("<{tag}>{content}");
            if close_tag {
                html.push_str(&format!("</{tag}>"));
            }
            if add_invalid_nesting {
                html.push_str("<p><div>Invalid nesting</div></p>");
            }

            let doc = parse_document(&html, DEPTH);
            prop_assert!(doc.find("body").is_some(), "Parser should recover: {}", html);
        }

        #[test]
        fn prop_broken_attributes_handled(
            tag in prop::sample::select(vec!["div", "p", "a", "img"]),
            attr_name in "[a-z]{1,10}",
            attr_value in "[a-zA-Z0-9]{0,20}",
            broken in prop::bool::ANY,
        ) {
            let html = if broken {
                format!("<{tag} {attr_name}=\"{attr_value}>Content</{tag}>")
            } else {
                format!("<{tag} {attr_name}>Content</{tag}>")
            };

            let doc = parse_document(&html, DEPTH);
            prop_assert!(doc.find("body").is_some(), "Parser should handle broken attributes: {}", html);
        }
    }
}
