//! Create command - generate a plan for a goal

use clap::Args;
use learn_client::PlanClient;
use learn_core::{Config, CreatePlanRequest, Secrets};

use super::OutputArgs;

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// What you want to learn; be specific about why and your current level
    #[arg(required = true)]
    pub goal: String,

    /// Ask the backend for its sample plan instead of generating one
    #[arg(long)]
    pub fake: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CreateArgs {
    /// Execute the create command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let goal = self.goal.trim();
        if goal.is_empty() {
            anyhow::bail!("Goal must not be empty");
        }

        let secrets = Secrets::load()?;
        let request = CreatePlanRequest {
            goal: goal.to_string(),
            model: config.api.model.clone(),
            openai_api_key: secrets.openai_api_key(),
            fake: self.fake,
        };

        if verbose {
            tracing::info!(
                goal = %request.goal,
                model = ?request.model,
                forwards_key = request.openai_api_key.is_some(),
                "Requesting plan"
            );
        }

        let client = PlanClient::from_config(&config.api)?;

        eprintln!("Generating plan... (this may take up to a minute)");
        let plan = client.create_plan(&request).await?;

        if let Some(id) = &plan.id {
            eprintln!("Plan id: {}", id);
        }

        self.output.emit(&plan, config)
    }
}
