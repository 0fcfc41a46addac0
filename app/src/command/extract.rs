use clap::ValueEnum;
use scout_config::Config;
use scout_core::{ParameterExtractor, SearchParameters};
use scout_server::build_extractor;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full parameter mapping as JSON
    #[default]
    Json,
    /// Only the fields that were found, one per line
    Pretty,
}

#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub prompt: String,
    /// Delegate credential overriding the configured one
    pub api_key: Option<String>,
    pub format: OutputFormat,
}

/// Strategy for extracting parameters from a single prompt.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let api_key = config.delegate.resolve_api_key(input.api_key.as_deref());
        let extractor = build_extractor(&config.delegate, api_key);

        let extraction = extractor.extract(&input.prompt).await;
        info!("Extraction source: {:?}", extraction.source);

        println!(
            "{}",
            render(input.format, &input.prompt, &extraction.parameters)?
        );
        Ok(())
    }
}

fn render(format: OutputFormat, prompt: &str, params: &SearchParameters) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Value::Object(
            params.to_mapping(),
        ))?),
        OutputFormat::Pretty => {
            let mut out = format!("Prompt: \"{prompt}\"\n\nExtracted Parameters:");
            for (name, value) in params.populated_fields() {
                out.push_str(&format!("\n  {name}: {value}"));
            }
            Ok(out)
        }
    }
}
