//! Editing session example
//!
//! Walks through styling, annotation, undo/redo, and change notification.
//! Run with `RUST_LOG=rich_text_core=debug` to see the engine's tracing output.

use rich_text_core::{
    Document, HIGHLIGHT_STYLE, Position, Range, SEARCH_MATCH_STYLE, SearchOptions,
    StyleAttributes,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Editing session ===\n");

    let mut doc = Document::new("Hello Beautiful World");

    let changes = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&changes);
    doc.subscribe(move |change| {
        let mut count = counter.lock().unwrap();
        *count += 1;
        println!(
            "  change #{}: {:?} (version {} -> {})",
            count, change.change_type, change.old_version, change.new_version
        );
    });

    println!("1. Styling:");
    doc.add_style(Range::on_line(0, 0, 6), StyleAttributes::bold());
    doc.add_style(Range::on_line(0, 6, 15), StyleAttributes::italic());
    doc.add_style(Range::on_line(0, 16, 21), StyleAttributes::underline());
    print_spans(&doc);

    println!("\n2. Annotating:");
    let id = doc.add_rich_span(Range::on_line(0, 0, 10), HIGHLIGHT_STYLE);
    println!("  highlight {:?} -> {:?}", id, id.and_then(|id| doc.rich_span(id)));

    println!("\n3. Deleting [3, 17):");
    doc.delete_range(Range::on_line(0, 3, 17));
    println!("  text: {:?}", doc.text());
    print_spans(&doc);

    println!("\n4. Undo:");
    doc.undo();
    println!("  text: {:?}  cursor: {:?}", doc.text(), doc.cursor());
    print_spans(&doc);

    println!("\n5. Splitting the line:");
    doc.set_cursor(Position::new(0, 5));
    doc.insert_text("\n");
    for (idx, line) in doc.lines().iter().enumerate() {
        println!("  line {}: {:?}", idx, line.text());
    }

    println!("\n6. Search highlighting:");
    let matches = doc
        .highlight_matches("l", SearchOptions::default(), SEARCH_MATCH_STYLE)
        .unwrap_or(0);
    println!("  {} matches highlighted", matches);

    println!(
        "\n{} changes observed, version {}",
        changes.lock().unwrap(),
        doc.version()
    );
}

fn print_spans(doc: &Document) {
    for (idx, line) in doc.lines().iter().enumerate() {
        for span in line.spans() {
            let attrs: Vec<String> = span
                .attributes
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            println!(
                "  line {} [{}, {}) {}",
                idx,
                span.start,
                span.end,
                attrs.join(" ")
            );
        }
    }
}
