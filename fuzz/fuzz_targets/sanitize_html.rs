#![no_main]

use enml_content::elements::{
    ElementClass, classify, is_prohibited_attribute, is_valid_attribute_name,
};
use enml_content::parser::parse_document;
use enml_content::sanitizer::Sanitizer;
use enml_content::dom::{Element, Node};
use libfuzzer_sys::fuzz_target;

fn check(element: &Element) {
    assert_eq!(classify(&element.name), ElementClass::Permitted, "{}", element.name);
    for (name, _) in &element.attrs {
        assert!(!is_prohibited_attribute(name), "{name}");
        assert!(is_valid_attribute_name(name), "{name:?}");
    }
    for child in element.children.iter().filter_map(Node::as_element) {
        check(child);
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(markup) = std::str::from_utf8(data) else {
        return;
    };
    let note = Sanitizer::new().sanitize(&parse_document(markup, 256));
    for child in note.children.iter().filter_map(Node::as_element) {
        check(child);
    }
});
