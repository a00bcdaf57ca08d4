use anyhow::Result;

use crate::engines;

pub fn run_engines(kind: &str) -> Result<()> {
    let wanted = engines::get_engines(kind);

    if wanted.is_empty() {
        eprintln!("No engines serve modality '{}'.", kind);
    }

    println!("{}", serde_json::to_string_pretty(&wanted)?);

    Ok(())
}
