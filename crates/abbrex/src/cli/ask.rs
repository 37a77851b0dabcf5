use abbrex_core::{ExtractionPipeline, LlmConfig, Parser as _};
use anyhow::{Context, Result};
use console::style;

use super::AskArgs;

pub async fn run(args: &AskArgs) -> Result<()> {
    let config = resolve_config(args);

    let context = match &args.file {
        Some(path) => {
            let document = ExtractionPipeline::new()
                .parser()
                .parse_file(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            document.full_text
        }
        None => String::new(),
    };

    let client = abbrex_core::client_from_config(&config)?;
    let answer = abbrex_core::ask(client.as_ref(), &context, &args.question)
        .await
        .context("Error while calling the LLM API")?;

    eprintln!(
        "{} {} / {}",
        style("●").green(),
        answer.provider,
        style(&answer.model).dim()
    );
    println!("{}", answer.text);

    Ok(())
}

/// Flags override the environment. Switching provider resets the model and
/// endpoint to that provider's defaults unless they are given too.
fn resolve_config(args: &AskArgs) -> LlmConfig {
    let env = LlmConfig::from_env();

    let mut config = match args.provider {
        Some(provider) if provider != env.provider => {
            LlmConfig::for_provider(provider).with_api_key(env.api_key.clone())
        }
        _ => env,
    };

    if let Some(model) = &args.model {
        config.model.clone_from(model);
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint.clone_from(endpoint);
    }

    config.with_api_key(args.api_key.clone())
}
