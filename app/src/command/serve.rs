use scout_config::Config;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ServeInput {
    /// Listen address overriding config and environment.
    pub bind: Option<String>,
}

/// Strategy for running the HTTP endpoint until interrupted.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        info!(
            "Delegate {} (model: {})",
            if config.delegate.enabled { "enabled" } else { "disabled" },
            config.delegate.model
        );
        scout_server::serve(config, input.bind.as_deref()).await?;
        Ok(())
    }
}
