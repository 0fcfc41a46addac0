use scout_config::Config;

/// Strategy for initializing the configuration.
///
/// This strategy creates the default configuration file at `~/scout/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set your API key and \"enabled\": true under \"delegate\"");
        println!("      to enable LLM extraction (pattern extraction works without it)");
        println!("   2. Run 'scout extract --prompt \"...\"' to try a query");
        println!("   3. Run 'scout serve' to start the HTTP endpoint");
        println!();
        Ok(())
    }
}
