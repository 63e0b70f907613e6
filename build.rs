use anyhow::Result;
use vergen::EmitBuilder;

fn main() -> Result<()> {
    // Outside a git checkout vergen only warns and the CLI falls back to the
    // bare package version.
    EmitBuilder::builder().git_sha(true).emit()?;
    Ok(())
}
