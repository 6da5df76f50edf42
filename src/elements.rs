//! Element classification tables
//!
//! Static tag and attribute tables shared by text extraction and the ENML
//! sanitizer. Tag names are matched in lowercase, the form html5ever produces
//! for every HTML element.
//!
//! - **Block** elements end with a line break when extracted as plain text.
//! - **Inline** elements flow with the surrounding text.
//! - **Permitted** elements survive sanitization (minus prohibited attributes).
//! - **Prohibited** elements are removed together with their content.
//!
//! A tag that is neither permitted nor prohibited is unwrapped by the
//! sanitizer: its children stay, the tag itself goes.

/// Elements rendered on their own line
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "canvas",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "noscript",
    "ol",
    "output",
    "p",
    "pre",
    "section",
    "table",
    "tfoot",
    "ul",
    "video",
];

/// Elements that flow within surrounding text
pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdo", "big", "br", "button", "cite", "code", "dfn", "em", "i",
    "img", "input", "kbd", "label", "map", "object", "q", "samp", "script", "select", "small",
    "span", "strong", "sub", "sup", "textarea", "time", "tt", "var",
];

/// Elements ENML accepts
pub const PERMITTED_ELEMENTS: &[&str] = &[
    "a",
    "abbr",
    "acronym",
    "address",
    "area",
    "b",
    "bdo",
    "big",
    "blockquote",
    "br",
    "caption",
    "center",
    "cite",
    "code",
    "col",
    "colgroup",
    "dd",
    "del",
    "dfn",
    "div",
    "dl",
    "dt",
    "em",
    "font",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "i",
    "img",
    "ins",
    "kbd",
    "li",
    "map",
    "ol",
    "p",
    "pre",
    "q",
    "s",
    "samp",
    "small",
    "span",
    "strike",
    "strong",
    "sub",
    "sup",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "tt",
    "u",
    "ul",
    "var",
    "xmp",
];

/// Elements removed with their whole subtree
pub const PROHIBITED_ELEMENTS: &[&str] = &[
    "applet",    // Legacy Java applets
    "base",      // Changes the base URL of every link
    "basefont",
    "bgsound",
    "blink",
    "body",
    "button",
    "dir",
    "embed",     // Plugin content
    "fieldset",
    "form",
    "frame",
    "frameset",
    "head",
    "html",
    "iframe",    // Loads external content
    "ilayer",
    "input",
    "isindex",
    "label",
    "layer",
    "legend",
    "link",      // External stylesheets
    "marquee",
    "menu",
    "meta",
    "noframes",
    "noscript",
    "object",
    "optgroup",
    "option",
    "param",
    "plaintext",
    "script",    // JavaScript execution
    "select",
    "style",     // CSS injection
    "textarea",
    "xml",
];

/// Attribute name prefixes stripped from permitted elements
///
/// Matching is by prefix, so `on` covers every event handler and `data`
/// covers every `data-*` attribute.
pub const PROHIBITED_ATTRIBUTE_PREFIXES: &[&str] = &[
    "id",
    "class",
    "onclick",
    "ondblclick",
    "on",
    "accesskey",
    "data",
    "dynsrc",
    "tabindex",
];

/// Permitted elements whose content HTML parses as raw text
///
/// Character references inside them are not decoded by the parser, so the
/// sanitizer decodes them before the serializer escapes the text again.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["xmp"];

/// How the sanitizer treats an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    /// Keep the element, strip prohibited attributes
    Permitted,
    /// Remove the element and all its children
    Prohibited,
    /// Drop the tag, keep its children in place
    Unwrap,
}

/// Classify a tag name for sanitization
///
/// # Examples
///
/// ```
/// use enml_content::elements::{classify, ElementClass};
///
/// assert_eq!(classify("p"), ElementClass::Permitted);
/// assert_eq!(classify("script"), ElementClass::Prohibited);
/// assert_eq!(classify("article"), ElementClass::Unwrap);
/// ```
pub fn classify(tag_name: &str) -> ElementClass {
    if PERMITTED_ELEMENTS.contains(&tag_name) {
        ElementClass::Permitted
    } else if PROHIBITED_ELEMENTS.contains(&tag_name) {
        ElementClass::Prohibited
    } else {
        ElementClass::Unwrap
    }
}

/// Returns true if the tag forces a line break in plain text
pub fn is_block(tag_name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag_name)
}

/// Returns true if the tag flows within surrounding text
pub fn is_inline(tag_name: &str) -> bool {
    INLINE_ELEMENTS.contains(&tag_name)
}

/// Returns true if the attribute must not appear in ENML
///
/// ```
/// use enml_content::elements::is_prohibited_attribute;
///
/// assert!(is_prohibited_attribute("onmouseover"));
/// assert!(is_prohibited_attribute("data-id"));
/// assert!(!is_prohibited_attribute("href"));
/// ```
pub fn is_prohibited_attribute(attr_name: &str) -> bool {
    PROHIBITED_ATTRIBUTE_PREFIXES
        .iter()
        .any(|prefix| attr_name.starts_with(prefix))
}

/// Returns true if HTML parses the element's content as raw text
pub fn is_raw_text(tag_name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag_name)
}

/// Returns true if the name can be written as an XML attribute name
///
/// The HTML tokenizer accepts almost any character in an attribute name,
/// including quotes and `<`. Only names made of letters, digits, `-`, `_` and
/// `.`, starting with a letter or `_`, are kept. Colons are refused because
/// ENML declares no namespace prefixes.
///
/// ```
/// use enml_content::elements::is_valid_attribute_name;
///
/// assert!(is_valid_attribute_name("href"));
/// assert!(is_valid_attribute_name("aria-label"));
/// assert!(!is_valid_attribute_name("\"x"));
/// assert!(!is_valid_attribute_name("a<b"));
/// ```
pub fn is_valid_attribute_name(attr_name: &str) -> bool {
    let mut chars = attr_name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_permitted_and_prohibited_are_disjoint() {
        for tag in PERMITTED_ELEMENTS {
            assert!(
                !PROHIBITED_ELEMENTS.contains(tag),
                "{tag} is both permitted and prohibited"
            );
        }
    }

    #[test]
    fn test_block_and_inline_are_disjoint() {
        for tag in BLOCK_ELEMENTS {
            assert!(!INLINE_ELEMENTS.contains(tag), "{tag} is both block and inline");
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("div"), ElementClass::Permitted);
        assert_eq!(classify("br"), ElementClass::Permitted);
        assert_eq!(classify("style"), ElementClass::Prohibited);
        assert_eq!(classify("iframe"), ElementClass::Prohibited);
        assert_eq!(classify("section"), ElementClass::Unwrap);
        assert_eq!(classify("en-note"), ElementClass::Unwrap);
    }

    #[test]
    fn test_table_rows_are_unclassified_for_text() {
        assert!(is_block("table"));
        for tag in ["tr", "td", "th", "tbody", "thead"] {
            assert!(!is_block(tag));
            assert!(!is_inline(tag));
        }
    }

    #[test]
    fn test_prohibited_attribute_prefixes() {
        assert!(is_prohibited_attribute("id"));
        assert!(is_prohibited_attribute("class"));
        assert!(is_prohibited_attribute("onclick"));
        assert!(is_prohibited_attribute("onload"));
        assert!(is_prohibited_attribute("tabindex"));
        assert!(is_prohibited_attribute("data-toggle"));

        assert!(!is_prohibited_attribute("href"));
        assert!(!is_prohibited_attribute("src"));
        assert!(!is_prohibited_attribute("style"));
        assert!(!is_prohibited_attribute("title"));
    }

    #[test]
    fn test_attribute_name_validity() {
        for name in ["href", "alt", "xml-lang", "_x", "a.b", "r\u{e9}sum\u{e9}", "h1"] {
            assert!(is_valid_attribute_name(name), "{name} should be valid");
        }
        for name in ["", "\"x", "'", "a<b", "1a", "-a", "a=b", "a/b", "xlink:href", "a b"] {
            assert!(!is_valid_attribute_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_raw_text_elements_are_permitted() {
        for tag in RAW_TEXT_ELEMENTS {
            assert_eq!(classify(tag), ElementClass::Permitted);
        }
        assert!(is_raw_text("xmp"));
        assert!(!is_raw_text("pre"));
    }

    proptest! {
        #[test]
        fn prop_event_handlers_are_prohibited(suffix in "[a-z]{0,16}") {
            let attr = format!("on{suffix}");
            prop_assert!(is_prohibited_attribute(&attr));
        }
    }
}
