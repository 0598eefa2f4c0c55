//! Basic usage of segmentation and message formatting

use glossa_api::{
    format_message, segment_text, Argument, Config, MessageFormat, SegmentKind, Segmenter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: Simplest usage with convenience function
    println!("=== Method 1: Convenience Function ===");
    let output = segment_text(
        "Hello world. This is a test. How are you?",
        SegmentKind::Sentence,
        "en",
    )?;

    println!("Found {} sentences:", output.segments.len());
    for (i, segment) in output.segments.iter().enumerate() {
        println!(
            "  Sentence {}: [{}, {}) {:?}",
            i + 1,
            segment.start,
            segment.end,
            segment.text
        );
    }
    println!("Processing took {}ms\n", output.metadata.processing_time_ms);

    // Method 2: Sessions with shared and independent views
    println!("=== Method 2: Sessions ===");
    let segmenter = Segmenter::with_config(Config::words());
    let session = segmenter.open("Grüße aus Köln")?;
    let words: Vec<String> = session
        .independent_text()?
        .filter(|word| !word.trim().is_empty())
        .collect();
    println!("Words: {words:?}\n");

    // Method 3: Custom configuration
    println!("=== Method 3: Custom Configuration ===");
    let segmenter = Config::builder()
        .locale("th")?
        .kind(SegmentKind::Word)
        .build_segmenter()?;
    let output = segmenter.segment_text("สวัสดีครับ")?;
    println!("Thai words: {:?}\n", output.texts());

    // Method 4: Message formatting
    println!("=== Method 4: Messages ===");
    let message = MessageFormat::new(
        "{name} has {count, plural, one {# unread message} other {# unread messages}}",
        "en_GB",
    )?;
    for count in [1i64, 42] {
        let text = message.format([
            ("name", Argument::from("Ada")),
            ("count", Argument::from(count)),
        ])?;
        println!("{text}");
    }

    let price = format_message(
        "Total: {amount, number, #,##0.00}",
        "de_DE",
        [("amount", 1234.5f64)],
    )?;
    println!("{price}");

    Ok(())
}
