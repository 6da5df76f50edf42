//! HTML to ENML sanitization
//!
//! Reduces arbitrary HTML to the element and attribute subset ENML accepts.
//! Untrusted markup may contain scripts, event handlers, embedded frames and
//! form controls; none of them may reach a stored note.
//!
//! # Rules
//!
//! The conversion root is the first `<body>` element, or the whole document
//! when there is none. Every element below it is classified by tag name (see
//! [`crate::elements`]):
//!
//! 1. **Permitted**: kept, minus every attribute whose name starts with a
//!    prohibited prefix (`id`, `class`, `on`, `data`, ...) or is not a valid
//!    XML name
//! 2. **Prohibited**: removed together with its entire subtree
//! 3. **Anything else**: unwrapped; its children take its place in the parent
//!
//! The result is always a single `<en-note>` element. A `<body>` root becomes
//! the `<en-note>` itself; any other root is wrapped in a new one.
//!
//! The sanitizer never mutates its input. It builds a new tree, so unwrapping
//! never splices into a list that is being iterated.

use quick_xml::escape::unescape;

use crate::dom::{Document, Element, Node};
use crate::elements::{
    ElementClass, classify, is_prohibited_attribute, is_raw_text, is_valid_attribute_name,
};
use crate::serializer::EN_NOTE;

/// Allow-list sanitizer producing `<en-note>` trees
///
/// # Examples
///
/// ```
/// use enml_content::parser::parse_document;
/// use enml_content::sanitizer::Sanitizer;
///
/// let doc = parse_document(r#"<p class="x" onclick="go()">Hi<script>go()</script></p>"#, 1000);
/// let note = Sanitizer::new().sanitize(&doc);
///
/// assert_eq!(note.name, "en-note");
/// let p = note.find("p").unwrap();
/// assert!(p.attrs.is_empty());
/// assert!(note.find("script").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer;

impl Sanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Sanitize a parsed document into an `<en-note>` element
    pub fn sanitize(&self, document: &Document) -> Element {
        match document.find("body") {
            Some(body) => self.sanitize_body(body),
            None => Element {
                name: EN_NOTE.to_string(),
                attrs: Vec::new(),
                children: self.sanitize_children(&document.children),
            },
        }
    }

    /// Sanitize a single element subtree, treating it as the conversion root
    ///
    /// A `<body>` root is renamed to `<en-note>`; any other root is wrapped,
    /// with the root itself classified like every other element.
    pub fn sanitize_element(&self, root: &Element) -> Element {
        if root.name == "body" {
            return self.sanitize_body(root);
        }

        let mut children = Vec::new();
        self.sanitize_element_into(root, &mut children);
        Element {
            name: EN_NOTE.to_string(),
            attrs: Vec::new(),
            children,
        }
    }

    fn sanitize_body(&self, body: &Element) -> Element {
        Element {
            name: EN_NOTE.to_string(),
            attrs: self.filter_attributes(&body.attrs),
            children: self.sanitize_children(&body.children),
        }
    }

    /// Sanitize a list of sibling nodes, splicing unwrapped children in place
    pub fn sanitize_children(&self, nodes: &[Node]) -> Vec<Node> {
        let mut output = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.sanitize_node(node, &mut output);
        }
        output
    }

    fn sanitize_node(&self, node: &Node, output: &mut Vec<Node>) {
        match node {
            Node::Text(text) => output.push(Node::Text(text.clone())),
            Node::Element(element) => self.sanitize_element_into(element, output),
        }
    }

    fn sanitize_element_into(&self, element: &Element, output: &mut Vec<Node>) {
        match self.check_element(&element.name) {
            ElementClass::Permitted => {
                let mut children = self.sanitize_children(&element.children);
                if is_raw_text(&element.name) {
                    decode_raw_text(&mut children);
                }
                output.push(Node::Element(Element {
                    name: element.name.clone(),
                    attrs: self.filter_attributes(&element.attrs),
                    children,
                }));
            }
            ElementClass::Prohibited => {
                tracing::trace!(tag = %element.name, "Removing prohibited element");
            }
            ElementClass::Unwrap => {
                for child in &element.children {
                    self.sanitize_node(child, output);
                }
            }
        }
    }

    /// Decide what happens to an element
    ///
    /// ```
    /// use enml_content::elements::ElementClass;
    /// use enml_content::sanitizer::Sanitizer;
    ///
    /// let sanitizer = Sanitizer::new();
    /// assert_eq!(sanitizer.check_element("script"), ElementClass::Prohibited);
    /// assert_eq!(sanitizer.check_element("div"), ElementClass::Permitted);
    /// assert_eq!(sanitizer.check_element("section"), ElementClass::Unwrap);
    /// ```
    pub fn check_element(&self, tag_name: &str) -> ElementClass {
        classify(tag_name)
    }

    /// Keep only the attributes ENML allows, in their original order
    pub fn filter_attributes(&self, attrs: &[(String, String)]) -> Vec<(String, String)> {
        attrs
            .iter()
            .filter(|(name, _)| is_valid_attribute_name(name) && !is_prohibited_attribute(name))
            .cloned()
            .collect()
    }
}

/// Decode the character references of raw text content
///
/// Text that is not a valid escaped sequence (a bare `&`, an unknown entity)
/// is kept as written.
fn decode_raw_text(children: &mut [Node]) {
    for child in children {
        let Node::Text(text) = child else {
            continue;
        };
        let Ok(decoded) = unescape(text.as_str()).map(|decoded| decoded.into_owned()) else {
            continue;
        };
        *text = decoded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use proptest::prelude::*;

    fn sanitize_for_test(html: &str) -> Element {
        Sanitizer::new().sanitize(&parse_document(html, 1000))
    }

    #[test]
    fn test_body_becomes_en_note() {
        let note = sanitize_for_test("<html><head><title>t</title></head><body><p>x</p></body></html>");
        assert_eq!(note.name, "en-note");
        assert_eq!(
            note.children,
            vec![Element::new("p", vec![Node::text("x")]).into()]
        );
    }

    #[test]
    fn test_body_attributes_are_filtered() {
        let note = sanitize_for_test(r#"<body class="page" style="color: red" onload="x()"><p>x</p></body>"#);
        assert_eq!(
            note.attrs,
            vec![("style".to_string(), "color: red".to_string())]
        );
    }

    #[test]
    fn test_prohibited_subtree_is_removed() {
        let note = sanitize_for_test(
            "<p>Before</p><script>alert('xss')</script><style>p{}</style><p>After</p>",
        );
        assert_eq!(
            note.children,
            vec![
                Element::new("p", vec![Node::text("Before")]).into(),
                Element::new("p", vec![Node::text("After")]).into(),
            ]
        );
    }

    #[test]
    fn test_form_controls_are_removed() {
        let note = sanitize_for_test(
            r#"<form action="/x"><label>Name</label><input name="n"><button>Go</button></form><p>kept</p>"#,
        );
        assert_eq!(
            note.children,
            vec![Element::new("p", vec![Node::text("kept")]).into()]
        );
    }

    #[test]
    fn test_unclassified_elements_are_unwrapped_in_place() {
        let note = sanitize_for_test("<p>a</p><section>b<em>c</em>d</section><p>e</p>");
        assert_eq!(
            note.children,
            vec![
                Element::new("p", vec![Node::text("a")]).into(),
                Node::text("b"),
                Element::new("em", vec![Node::text("c")]).into(),
                Node::text("d"),
                Element::new("p", vec![Node::text("e")]).into(),
            ]
        );
    }

    #[test]
    fn test_nested_unwrap_inside_permitted() {
        let note = sanitize_for_test("<div><article><nav><span>x</span></nav></article></div>");
        assert_eq!(
            note.children,
            vec![
                Element::new(
                    "div",
                    vec![Element::new("span", vec![Node::text("x")]).into()]
                )
                .into()
            ]
        );
    }

    #[test]
    fn test_prohibited_inside_unwrapped() {
        let note = sanitize_for_test("<article>keep<iframe src=\"x\">drop</iframe></article>");
        assert_eq!(note.children, vec![Node::text("keep")]);
    }

    #[test]
    fn test_attribute_prefixes_are_stripped() {
        let note = sanitize_for_test(
            r#"<a href="http://example.com" class="sister" id="link1" data-x="1" tabindex="2" title="t">Elsie</a>"#,
        );
        let link = note.find("a").expect("link");
        assert_eq!(
            link.attrs,
            vec![
                ("href".to_string(), "http://example.com".to_string()),
                ("title".to_string(), "t".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_attribute_names_are_dropped() {
        let attrs = vec![
            ("\"x".to_string(), "1".to_string()),
            ("a<b".to_string(), "2".to_string()),
            ("href".to_string(), "/x".to_string()),
            ("xlink:href".to_string(), "/y".to_string()),
            ("alt".to_string(), "a".to_string()),
        ];
        assert_eq!(
            Sanitizer::new().filter_attributes(&attrs),
            vec![
                ("href".to_string(), "/x".to_string()),
                ("alt".to_string(), "a".to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_text_content_is_decoded() {
        let xmp = Element::new("xmp", vec![Node::text("a &amp; &lt;b&gt;")]);
        let note = Sanitizer::new().sanitize_element(&xmp);
        assert_eq!(
            note.children,
            vec![Element::new("xmp", vec![Node::text("a & <b>")]).into()]
        );
    }

    #[test]
    fn test_raw_text_without_references_is_kept() {
        let note = sanitize_for_test("<xmp>a & <b> &nosuch;</xmp>");
        let xmp = note.find("xmp").expect("xmp");
        assert_eq!(xmp.children, vec![Node::text("a & <b> &nosuch;")]);
    }

    #[test]
    fn test_sanitize_element_wraps_non_body_root() {
        let root = Element::new(
            "div",
            vec![
                Element::new("blink", vec![Node::text("x")]).into(),
                Node::text("y"),
            ],
        )
        .with_attr("id", "main");
        let note = Sanitizer::new().sanitize_element(&root);
        assert_eq!(note.name, "en-note");
        assert_eq!(
            note.children,
            vec![Element::new("div", vec![Node::text("y")]).into()]
        );
    }

    #[test]
    fn test_document_without_body_is_wrapped() {
        let doc = Document {
            children: vec![
                Element::new("p", vec![Node::text("x")]).into(),
                Element::new("custom", vec![Node::text("y")]).into(),
            ],
        };
        let note = Sanitizer::new().sanitize(&doc);
        assert_eq!(
            note.children,
            vec![
                Element::new("p", vec![Node::text("x")]).into(),
                Node::text("y"),
            ]
        );
    }

    #[test]
    fn test_input_is_untouched() {
        let doc = parse_document("<section><p class=\"c\">x</p></section>", 1000);
        let before = doc.clone();
        let _ = Sanitizer::new().sanitize(&doc);
        assert_eq!(doc, before);
    }

    fn collect_tags(element: &Element, tags: &mut Vec<String>) {
        tags.push(element.name.clone());
        for child in element.children.iter().filter_map(Node::as_element) {
            collect_tags(child, tags);
        }
    }

    fn collect_attrs(element: &Element, attrs: &mut Vec<String>) {
        attrs.extend(element.attrs.iter().map(|(name, _)| name.clone()));
        for child in element.children.iter().filter_map(Node::as_element) {
            collect_attrs(child, attrs);
        }
    }

    proptest! {
        #[test]
        fn prop_only_permitted_tags_survive(
            tag in prop::sample::select(vec![
                "div", "p", "span", "section", "article", "nav", "script", "style",
                "iframe", "font", "custom-tag", "center", "object", "main",
            ]),
            content in "[a-zA-Z0-9]{1,20}",
        ) {
            let html = format!("<div><{tag}>{content}</{tag}></div>");
            let note = sanitize_for_test(&html);

            let mut tags = Vec::new();
            collect_tags(&note, &mut tags);
            for found in tags.iter().skip(1) {
                prop_assert_eq!(classify(found), ElementClass::Permitted);
            }

            let text = crate::text::plain_text(&Node::Element(note.clone()));
            match classify(tag) {
                ElementClass::Prohibited => prop_assert!(!text.contains(&content)),
                _ => prop_assert!(text.contains(&content)),
            }
        }

        #[test]
        fn prop_prohibited_attributes_never_survive(
            prefix in prop::sample::select(vec!["id", "class", "on", "data", "accesskey", "dynsrc", "tabindex"]),
            suffix in "[a-z-]{0,8}",
            value in "[a-zA-Z0-9 ]{0,16}",
        ) {
            let html = format!(r#"<p {prefix}{suffix}="{value}" title="kept">x</p>"#);
            let note = sanitize_for_test(&html);

            let mut attrs = Vec::new();
            collect_attrs(&note, &mut attrs);
            prop_assert_eq!(attrs, vec!["title".to_string()]);
        }
    }
}
