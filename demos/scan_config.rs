//! Reading `key = value` lines with a look-ahead scanner.
//!
//! Run with: cargo run --example scan_config

use feedkit::{chars, Scanner};
use std::error::Error;

const CONFIG: &str = "\
# service settings
name = feedkit
/* multi-line
   comment */
threads = 4
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut scanner = Scanner::from_reader(CONFIG.as_bytes());

    while !scanner.is_eof()? {
        scanner.scan_chars(chars::WHITESPACE)?;
        if scanner.scan_char_eq('#')? {
            scanner.scan_to_char('\n')?;
            continue;
        }
        if scanner.scan_seq("/*")? {
            scanner.scan_to_seq("*/")?;
            scanner.scan_seq("*/")?;
            continue;
        }
        let key = scanner.scan_to_char_if(chars::or('=', chars::WHITESPACE))?;
        if key.is_empty() {
            continue;
        }
        scanner.scan_chars(chars::WHITESPACE)?;
        if !scanner.scan_char_eq('=')? {
            return Err(format!("expected '=' after {key:?} at {}", scanner.position()).into());
        }
        scanner.scan_chars(|c: char| c == ' ' || c == '\t')?;
        let value = scanner.scan_to_char('\n')?;
        println!("{key} => {}", value.trim_end());
    }

    scanner.close()?;
    Ok(())
}
