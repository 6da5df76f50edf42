//! Basic conversion example demonstrating the ENML content converter

use enml_content::search::NoteSearch;
use enml_content::{Content, html_from_restricted_xml};

fn main() {
    println!("=== ENML Content Converter - Basic Examples ===\n");

    // Example 1: Plain text to ENML
    example_1();

    // Example 2: HTML sanitized into ENML
    example_2();

    // Example 3: ENML back to HTML and plain text
    example_3();

    // Example 4: Missing <en-note> (error handling)
    example_4();

    // Example 5: Building a note search
    example_5();
}

fn example_1() {
    println!("Example 1: Plain text to ENML");
    let text = "Shopping list\n\nmilk\neggs & bread";
    println!("Input text:\n{}\n", text);

    let enml = Content::plain(text).to_enml();

    println!("Output ENML:");
    println!("{}", enml);
    println!("---\n");
}

fn example_2() {
    println!("Example 2: HTML sanitized into ENML");
    let html = r#"<h1 class="title">Title</h1><script>alert('xss')</script><p onclick="x()">Safe <b>content</b></p><section>unwrapped</section>"#;
    println!("Input HTML:\n{}\n", html);

    let enml = Content::html(html).to_enml();

    println!("Output ENML:");
    println!("{}", enml);
    println!("Note: scripts and event handlers are removed, unknown tags unwrapped\n");
    println!("---\n");
}

fn example_3() {
    println!("Example 3: ENML back to HTML and plain text");
    let enml = Content::plain("first line\nsecond line").to_enml();

    match enml.to_html() {
        Ok(html) => println!("HTML:\n{}\n", html),
        Err(e) => println!("Conversion failed: {}\n", e),
    }
    println!("Plain text:\n{}", enml.to_plain());
    println!("---\n");
}

fn example_4() {
    println!("Example 4: Missing <en-note>");
    let input = "<div>not a note</div>";
    println!("Input:\n{}\n", input);

    match html_from_restricted_xml(input) {
        Ok(html) => println!("HTML:\n{}", html),
        Err(e) => println!("Error: {}", e),
    }
    println!("---\n");
}

fn example_5() {
    println!("Example 5: Building a note search");
    let search = NoteSearch::new()
        .in_title(["meeting notes"])
        .not_any(["draft", "archive"])
        .weeks(1)
        .desc()
        .limit(10);

    println!("Search words: {}", search.words().unwrap_or(""));
    println!("Bounds: {:?}, ascending: {:?}", search.bounds(), search.ascending());
    println!("---\n");
}
