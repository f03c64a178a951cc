//! Describe constants and render them with the guard and case flags.
//!
//! Run with: cargo run --example descriptions

use constfile::{from_str, to_string_with_options, ConstantStore, ConstfileOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut store = ConstantStore::new();
    store
        .set_integer("UPLOAD_MAX", 1 << 20, Some("Maximum upload size in bytes"))?
        .set_float("TAX_RATE", "0.21", Some("VAT applied at checkout"))?
        .set_string("CURRENCY", "EUR", None)?;

    let variants = [
        ("Plain", ConstfileOptions::new()),
        ("Guarded", ConstfileOptions::new().with_check_defined(true)),
        (
            "Guarded, case-insensitive",
            ConstfileOptions::new()
                .with_check_defined(true)
                .with_case_insensitive(true),
        ),
    ];

    for (label, options) in variants {
        let text = to_string_with_options(&store, options);
        println!("{}:\n{}", label, text);

        let back = from_str(&text)?;
        assert_eq!(back.all_descriptions(), store.all_descriptions());
    }

    println!("✓ Descriptions survive every layout");
    Ok(())
}
