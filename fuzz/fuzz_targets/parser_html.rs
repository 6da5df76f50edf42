#![no_main]

use enml_content::parser::parse_document;
use enml_content::text::document_text;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(markup) = std::str::from_utf8(data) else {
        return;
    };
    let document = parse_document(markup, 256);
    let _ = document_text(&document);
});
