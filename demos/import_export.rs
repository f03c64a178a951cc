//! Write a constant file, import it, and export a copy beside it.
//!
//! Run with: cargo run --example import_export

use constfile::{import_then_export, ConstantStore};
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join("constfile-demo");
    fs::create_dir_all(&dir)?;

    let mut store = ConstantStore::new();
    store
        .set_check_defined(true)
        .set_boolean("MAINTENANCE", false, Some("Serve the maintenance page"))?
        .set_integer("PORT", 8080, None)?
        .set_string("HOST", "localhost", None)?;
    store.set_dirname(Some(dir.as_path()))?;

    let first = store.export(None)?;
    println!("Wrote {}", first.display());

    // Start over from what is on disk
    let copy = import_then_export(&mut store, &first, "constfile.copy.php")?;
    println!("Copied to {}", copy.display());

    assert_eq!(fs::read_to_string(&first)?, fs::read_to_string(&copy)?);
    println!("✓ Files are identical");
    println!("{}", fs::read_to_string(&copy)?);

    Ok(())
}
