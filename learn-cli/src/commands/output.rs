//! Shared plan output options

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use learn_core::{plan_markdown, Config, Plan, PlanView};

/// How a plan is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented subject tree
    Tree,
    /// Markdown learning hub with table of contents
    Markdown,
    /// Raw plan JSON
    Json,
}

/// Output options shared by the plan commands
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "tree")]
    pub format: OutputFormat,

    /// Show every resource and exercise list (tree format)
    #[arg(short, long)]
    pub expand: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Render `plan` in the selected format and write it out
    pub fn emit(&self, plan: &Plan, config: &Config) -> anyhow::Result<()> {
        let text = self.format_plan(plan, config)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &text)?;
                tracing::info!(path = %path.display(), "Plan written");
                eprintln!("Wrote {}", path.display());
            }
            None => print!("{}", text),
        }

        Ok(())
    }

    fn format_plan(&self, plan: &Plan, config: &Config) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Tree => {
                let mut view = PlanView::new(&plan.subject);
                if self.expand {
                    view.expand_all();
                }
                config.render.renderer().render_text(&plan.subject, &view)
            }
            OutputFormat::Markdown => plan_markdown(plan, config.api.model.as_deref()),
            OutputFormat::Json => {
                let mut json = plan.to_json_pretty()?;
                json.push('\n');
                json
            }
        })
    }
}
