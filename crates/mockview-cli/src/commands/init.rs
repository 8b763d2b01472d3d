//! The `mockview init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("mockview.toml");
    if path.exists() {
        println!("mockview.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created mockview.toml");
    }

    println!("\nNext steps:");
    println!("  1. Export ANTHROPIC_API_KEY (or edit mockview.toml) for tailored questions and coaching");
    println!("  2. Run: mockview signup --name <NAME> --email <EMAIL> --password <PW> --confirm-password <PW>");
    println!("  3. Run: mockview start --role \"Data Engineer\" --level mid --difficulty medium");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mockview configuration

default_provider = "anthropic"
default_model = "claude-sonnet-4-20250514"
temperature = 0.7
max_retries = 2
retry_delay_ms = 1000
# data_dir = "${HOME}/.local/share/mockview"

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

# Canned responses for trying mockview without an API key.
[providers.offline]
type = "mock"
default_response = "STRENGTHS: You answered the question directly."
"#;
