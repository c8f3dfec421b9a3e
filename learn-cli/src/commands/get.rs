//! Get command - fetch a stored plan by id

use clap::Args;
use learn_client::PlanClient;
use learn_core::Config;

use super::OutputArgs;

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Plan id returned when the plan was created
    #[arg(required = true)]
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl GetArgs {
    /// Execute the get command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        if verbose {
            tracing::info!(id = %self.id, base_url = %config.api.base_url, "Fetching plan");
        }

        let client = PlanClient::from_config(&config.api)?;
        let plan = client.get_plan(&self.id).await?;

        self.output.emit(&plan, config)
    }
}
