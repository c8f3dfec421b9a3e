//! Chat command - interactive "what do you want to learn?" session

use clap::Args;
use learn_client::PlanClient;
use learn_core::{
    plan_markdown, ChatPhase, ChatSession, Config, NodePath, Renderer, Role, Secrets, Submission,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const HELP: &str = "\
Type a learning goal to get a plan. Once a plan is shown:
  /resources <path>   show or hide the resources of a subject (e.g. /resources 1.2)
  /exercises <path>   show or hide the exercises of a subject
  /expand             show every resource and exercise list
  /collapse           hide every resource and exercise list
  /plan               print the plan again
  /markdown           print the plan as Markdown
  /clear              discard the plan and start over
  /help               show this help
  /quit               leave";

/// Arguments for the chat command
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Ask the backend for its sample plan instead of generating one
    #[arg(long)]
    pub fake: bool,
}

/// A slash command typed at the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatCommand {
    Resources(NodePath),
    Exercises(NodePath),
    Expand,
    Collapse,
    Plan,
    Markdown,
    Clear,
    Help,
    Quit,
}

/// Parse a line starting with `/`
fn parse_command(line: &str) -> Result<ChatCommand, String> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default().trim();

    let path = || arg.parse::<NodePath>().map_err(|e| e.to_string());

    match name {
        "/resources" | "/r" => Ok(ChatCommand::Resources(path()?)),
        "/exercises" | "/e" => Ok(ChatCommand::Exercises(path()?)),
        "/expand" => Ok(ChatCommand::Expand),
        "/collapse" => Ok(ChatCommand::Collapse),
        "/plan" => Ok(ChatCommand::Plan),
        "/markdown" | "/md" => Ok(ChatCommand::Markdown),
        "/clear" => Ok(ChatCommand::Clear),
        "/help" | "/?" => Ok(ChatCommand::Help),
        "/quit" | "/exit" | "/q" => Ok(ChatCommand::Quit),
        other => Err(format!("Unknown command {}. Type /help for commands.", other)),
    }
}

impl ChatArgs {
    /// Execute the chat command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let secrets = Secrets::load()?;
        let client = PlanClient::from_config(&config.api)?;

        if verbose {
            tracing::info!(base_url = %config.api.base_url, fake = self.fake, "Starting chat");
        }

        let mut session = ChatSession::new(client)
            .with_model(config.api.model.clone())
            .with_api_key(secrets.openai_api_key())
            .with_fake(self.fake);
        let renderer = config.render.renderer();

        let mut rl = DefaultEditor::new()
            .map_err(|e| anyhow::anyhow!("Failed to initialize readline: {}", e))?;
        let mut printed = 0;

        println!("Learn chat (type /help for commands, /quit to leave)");
        println!();

        loop {
            printed = print_new_messages(&session, printed);

            let line = match rl.readline("> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(anyhow::anyhow!("Readline error: {}", e)),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let _ = rl.add_history_entry(line);

            if line.starts_with('/') {
                match parse_command(line) {
                    Ok(ChatCommand::Quit) => break,
                    Ok(command) => {
                        println!("{}", run_command(&mut session, &renderer, config, command))
                    }
                    Err(message) => println!("{}", message),
                }
                continue;
            }

            match session.submit(line) {
                Submission::Request(request) => {
                    printed = print_new_messages(&session, printed);
                    let result = session.api().create_plan(&request).await;
                    session.resolve(result);
                    print_plan(&session, &renderer);
                }
                Submission::Feedback | Submission::Ignored => {}
            }
        }

        Ok(())
    }
}

/// Print transcript entries after index `from`, returning the new count
fn print_new_messages<A>(session: &ChatSession<A>, from: usize) -> usize {
    let transcript = session.transcript();
    for message in transcript.iter().skip(from) {
        if message.role == Role::System {
            println!("{}", message.text);
        }
    }
    transcript.len()
}

fn print_plan<A>(session: &ChatSession<A>, renderer: &Renderer) {
    if let Some(text) = plan_text(session, renderer) {
        println!();
        print!("{}", text);
        println!();
    }
}

fn plan_text<A>(session: &ChatSession<A>, renderer: &Renderer) -> Option<String> {
    match session.phase() {
        ChatPhase::PlanShown { plan, view } => Some(renderer.render_text(&plan.subject, view)),
        _ => None,
    }
}

/// Apply a slash command to the session and return what to print
fn run_command<A>(
    session: &mut ChatSession<A>,
    renderer: &Renderer,
    config: &Config,
    command: ChatCommand,
) -> String {
    let toggled = match command {
        ChatCommand::Help => return HELP.to_string(),
        ChatCommand::Quit => return String::new(),
        ChatCommand::Clear => {
            session.clear();
            return "Cleared. What do you want to learn?".to_string();
        }
        ChatCommand::Plan => return plan_text(session, renderer).unwrap_or_else(no_plan),
        ChatCommand::Markdown => {
            return match session.plan() {
                Some(plan) => plan_markdown(plan, config.api.model.as_deref()),
                None => no_plan(),
            }
        }
        ChatCommand::Resources(path) => session
            .plan_and_view_mut()
            .map(|(_, view)| view.toggle_resources(&path).map(|_| ())),
        ChatCommand::Exercises(path) => session
            .plan_and_view_mut()
            .map(|(_, view)| view.toggle_exercises(&path).map(|_| ())),
        ChatCommand::Expand => session.plan_and_view_mut().map(|(_, view)| {
            view.expand_all();
            Ok(())
        }),
        ChatCommand::Collapse => session.plan_and_view_mut().map(|(_, view)| {
            view.collapse_all();
            Ok(())
        }),
    };

    match toggled {
        None => no_plan(),
        Some(Ok(())) => plan_text(session, renderer).unwrap_or_else(no_plan),
        Some(Err(e)) => e.to_string(),
    }
}

fn no_plan() -> String {
    "No plan yet.".to_string()
}
