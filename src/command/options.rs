use anyhow::Result;

use crate::engines::{self, Prompt};

pub fn run_options(kind: &str, client: &str, model: &str, defaults_only: bool) -> Result<()> {
    let prompt = Prompt::new(kind, client, model);
    let options = engines::get_options(&prompt);

    if options.is_empty() {
        eprintln!("No options for {}/{} ({}).", client, model, kind);
    }

    let rendered = if defaults_only {
        serde_json::to_string_pretty(&engines::get_default_options(&options))?
    } else {
        serde_json::to_string_pretty(&options)?
    };
    println!("{}", rendered);

    Ok(())
}
