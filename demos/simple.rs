//! Build a few constants, render them, and read them back.
//!
//! Run with: cargo run --example simple

use constfile::{from_str, to_string, ConstantStore};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut store = ConstantStore::new();
    store
        .set_boolean("DEBUG", "0", None)?
        .set_integer("MAX_CONNECTIONS", "64 connections", None)?
        .set_float("RATIO", 3, None)?
        .set_string("APP_NAME", "shop \"deluxe\"", None)?;

    let text = to_string(&store);
    println!("Constant file:\n{}", text);

    let back = from_str(&text)?;
    assert_eq!(back.all_values(), store.all_values());
    println!("✓ Round-trip successful");

    for (name, value) in back.all_values() {
        println!("  {} = {:?}", name, value);
    }

    Ok(())
}
