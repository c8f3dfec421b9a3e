//! Render command - display a plan saved as JSON

use std::path::{Path, PathBuf};

use clap::Args;
use learn_core::{Config, Plan, PlanResponse};

use super::OutputArgs;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Plan JSON file; either a bare plan or a `{"plan": ...}` response body
    #[arg(required = true)]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let plan = load_plan(&self.file)?;

        if verbose {
            tracing::info!(
                file = %self.file.display(),
                subjects = plan.subject.node_count(),
                depth = plan.subject.depth(),
                "Loaded plan"
            );
        }

        self.output.emit(&plan, config)
    }
}

/// Read a plan from `path`, accepting a saved response body too
pub fn load_plan(path: &Path) -> anyhow::Result<Plan> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    if let Ok(response) = serde_json::from_str::<PlanResponse>(&content) {
        return Ok(response.plan);
    }

    Plan::from_json(&content)
        .map_err(|e| anyhow::anyhow!("{} is not a plan: {}", path.display(), e))
}
