//! Splitting text into trimmed fields, configured in code or from JSON.
//!
//! Run with: cargo run --example csv_fields

use feedkit::{SplitOptions, Splitter};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let text = "id, name ,, city\n1, Alice ,, Paris\n2,Bob,,  Oslo";

    let lines = Splitter::on_char('\n');
    let fields = Splitter::on_char(',').trim_whitespace();

    for line in lines.split(text) {
        let row = fields.split_to_vec(&line);
        println!("{:?}", row);
    }

    // Same field rules, loaded from configuration
    let options: SplitOptions =
        serde_json::from_str(r#"{"delimiter": {"any_of": ",;"}, "trim_whitespace": true, "omit_empty": true}"#)?;
    let configured = Splitter::from_options(&options)?;
    println!("{:?}", configured.split_to_vec(" a ; b,, c "));

    // Tokens are views into the original text
    let first = fields.split(text).head()?;
    println!("first field {:?} at bytes {:?}", first.as_str(), first.range());

    Ok(())
}
