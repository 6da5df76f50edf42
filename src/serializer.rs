//! XML serialization for ENML output
//!
//! Writes an owned [`Element`] tree as well-formed XML in a pretty-printed
//! layout: every element and every text run gets its own line, indented by
//! depth. Text is trimmed, whitespace-only text is left out, and text and
//! attribute values are XML-escaped.
//!
//! Void elements (`br`, `hr`, `img`, ...) are written self-closing with an
//! explicit slash (`<br/>`), never as a bare HTML start tag. Every other
//! element gets an explicit end tag, even when empty, so the output reads back
//! the same through an HTML5 parser.
//!
//! `<pre>` subtrees are written inline and verbatim so their whitespace
//! survives. Content starting with a line feed gets one extra line feed after
//! `<pre>`, which an HTML parser discards again.

use quick_xml::escape::{escape, partial_escape};

use crate::dom::{Element, Node};

/// XML declaration that opens every ENML document
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// System identifier of the ENML DTD
pub const ENML_DTD_URL: &str = "http://xml.evernote.com/pub/enml2.dtd";

/// Root element name of ENML
pub const EN_NOTE: &str = "en-note";

/// Elements that never have content
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Build the two-line ENML preamble (XML declaration and doctype)
///
/// ```rust
/// use enml_content::serializer::{enml_preamble, ENML_DTD_URL};
///
/// let preamble = enml_preamble(ENML_DTD_URL);
/// assert!(preamble.starts_with("<?xml"));
/// assert!(preamble.ends_with(r#"<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">"#));
/// ```
pub fn enml_preamble(dtd_url: &str) -> String {
    format!("{XML_DECLARATION}\n<!DOCTYPE {EN_NOTE} SYSTEM \"{dtd_url}\">")
}

/// Serialize an element tree, one node per line
///
/// `indent` is the number of spaces added per nesting level. The result has
/// no trailing newline.
pub fn to_pretty_string(element: &Element, indent: usize) -> String {
    let mut writer = PrettyWriter {
        indent,
        output: String::with_capacity(256),
    };
    writer.element(element, 0);
    if writer.output.ends_with('\n') {
        writer.output.pop();
    }
    writer.output
}

/// Serialize a text node on its own, as the pretty printer would
pub fn text_to_string(text: &str) -> String {
    partial_escape(text.trim()).into_owned()
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn write_start_tag(output: &mut String, element: &Element, self_closing: bool) {
    output.push('<');
    output.push_str(&element.name);
    for (name, value) in &element.attrs {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape(value.as_str()));
        output.push('"');
    }
    output.push_str(if self_closing { "/>" } else { ">" });
}

fn write_end_tag(output: &mut String, element: &Element) {
    output.push_str("</");
    output.push_str(&element.name);
    output.push('>');
}

struct PrettyWriter {
    indent: usize,
    output: String,
}

impl PrettyWriter {
    fn pad(&mut self, depth: usize) {
        self.output
            .extend(std::iter::repeat_n(' ', depth * self.indent));
    }

    fn element(&mut self, element: &Element, depth: usize) {
        self.pad(depth);

        if is_void(&element.name) && element.children.is_empty() {
            write_start_tag(&mut self.output, element, true);
            self.output.push('\n');
            return;
        }

        if element.name == "pre" {
            write_inline(&mut self.output, element);
            self.output.push('\n');
            return;
        }

        write_start_tag(&mut self.output, element, false);
        self.output.push('\n');

        for child in &element.children {
            match child {
                Node::Element(child) => self.element(child, depth + 1),
                Node::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        self.pad(depth + 1);
                        self.output.push_str(&partial_escape(text));
                        self.output.push('\n');
                    }
                }
            }
        }

        self.pad(depth);
        write_end_tag(&mut self.output, element);
        self.output.push('\n');
    }
}

/// Write an element without any added whitespace
fn write_inline(output: &mut String, element: &Element) {
    if is_void(&element.name) && element.children.is_empty() {
        write_start_tag(output, element, true);
        return;
    }

    write_start_tag(output, element, false);
    // HTML parsers drop one line feed right after <pre>
    if element.name == "pre"
        && matches!(element.children.first(), Some(Node::Text(text)) if text.starts_with('\n'))
    {
        output.push('\n');
    }
    for child in &element.children {
        match child {
            Node::Element(child) => write_inline(output, child),
            Node::Text(text) => output.push_str(&partial_escape(text.as_str())),
        }
    }
    write_end_tag(output, element);
}
