//! `show`: assemble a pattern file and print the resulting buffer.

use std::path::Path;

use anyhow::Result;

use crate::output;
use crate::pattern::Pattern;

pub fn execute(path: &Path, json: bool) -> Result<()> {
    let spec = Pattern::load(path)?.to_spec()?;
    output::print_spec(&spec, json);
    Ok(())
}
