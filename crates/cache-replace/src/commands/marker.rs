//! Marker command - print the marker text for placeholder names

use crate::output::print_text;
use anyhow::Result;
use cache_replace_core::marker::marker;

pub fn run(names: Vec<String>) -> Result<()> {
    for name in names {
        print_text(&marker(name))?;
    }
    Ok(())
}
