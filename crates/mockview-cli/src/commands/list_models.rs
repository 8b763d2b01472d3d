//! The `mockview list-models` command.

use std::path::Path;

use anyhow::Result;

use mockview_providers::create_provider;

pub fn execute(provider_filter: Option<String>, config_path: Option<&Path>) -> Result<()> {
    let config = mockview_providers::load_config_from(config_path)?;

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort();

    let mut found_any = false;
    for name in names {
        if provider_filter.as_ref().is_some_and(|filter| filter != name) {
            continue;
        }

        let provider_config = &config.providers[name];
        let provider = match create_provider(name, provider_config) {
            Ok(provider) => provider,
            Err(e) => {
                eprintln!("Skipping {name}: {e:#}");
                continue;
            }
        };
        let models = provider.available_models();

        if !models.is_empty() {
            found_any = true;
            let marker = if *name == config.default_provider {
                " (default)"
            } else {
                ""
            };
            println!("Provider: {name}{marker}");
            for model in &models {
                println!(
                    "  {} - {} ({}K context)",
                    model.id,
                    model.name,
                    model.max_context / 1000,
                );
            }
            println!();
        }
    }

    if !found_any {
        println!("No providers configured. Run `mockview init` to create a config file.");
    }

    Ok(())
}
