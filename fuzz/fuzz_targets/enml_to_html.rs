#![no_main]

use enml_content::content::{ContentConverter, ConversionOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(enml) = std::str::from_utf8(data) else {
        return;
    };
    let converter = ContentConverter::with_options(ConversionOptions {
        max_depth: 256,
        ..Default::default()
    });
    let _ = converter.html_from_enml(enml);
});
