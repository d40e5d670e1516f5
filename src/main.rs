use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use e4all::advice::{self, AdviceClient};
use e4all::app::App;
use e4all::config::Config;
use e4all::provider::Provider;
use e4all::tui::{self, EventHandler};
use e4all::{catalog, handler, logging, ui};

#[derive(Parser)]
#[command(name = "e4all")]
#[command(about = "E4All Academy in the terminal, with an AI course advisor")]
#[command(version)]
struct Cli {
    /// Advice backend (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    provider: Option<Provider>,

    /// Model name (overrides the config file)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the advisor one question and print the answer
    Ask {
        /// Your question
        question: String,
    },
    /// List the academy's courses
    Courses,
    /// Write a default config file if none exists and print its path
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let log_path = logging::init_file(cli.verbose)?;
            info!(log = %log_path.display(), "starting e4all");
            let config = Config::load()?;
            let mut app = build_app(&config, cli.provider, cli.model)?;
            run_tui(&mut app).await
        }
        Some(Commands::Ask { question }) => {
            logging::init_stderr(cli.verbose)?;
            let config = Config::load()?;
            ask(&config, cli.provider, cli.model, &question).await
        }
        Some(Commands::Courses) => {
            list_courses();
            Ok(())
        }
        Some(Commands::Config) => {
            logging::init_stderr(cli.verbose)?;
            init_config()
        }
    }
}

fn advice_client(
    config: &Config,
    provider: Option<Provider>,
    model: Option<String>,
) -> Result<(AdviceClient, Provider, String)> {
    let provider = match provider {
        Some(p) => p,
        None => config.provider()?,
    };
    let model = model.unwrap_or_else(|| config.model_for(provider));
    let backend = advice::backend_for(provider, &model, config);
    info!(provider = provider.as_str(), %model, "advice backend ready");

    let client = AdviceClient::new(
        backend,
        catalog::system_instruction(),
        config.fallback_text(),
    );
    Ok((client, provider, model))
}

fn build_app(config: &Config, provider: Option<Provider>, model: Option<String>) -> Result<App> {
    let (client, provider, model) = advice_client(config, provider, model)?;
    Ok(App::new(client, config.greeting(), provider, model))
}

async fn run_tui(app: &mut App) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(app, frame))?;

            if let Some(event) = events.next().await {
                handler::handle_event(app, event);
            }
            app.poll_advice().await;
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    info!(turns = app.session.transcript().len(), "session ended");
    result
}

async fn ask(
    config: &Config,
    provider: Option<Provider>,
    model: Option<String>,
    question: &str,
) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("question must not be empty");
    }

    let (client, _, _) = advice_client(config, provider, model)?;
    let reply = client.request_advice(question).await;
    println!("{reply}");
    Ok(())
}

fn list_courses() {
    println!("{}", catalog::COURSES_HEADING);
    println!("{}", "=".repeat(40));

    for course in &catalog::COURSES {
        println!("\n{} [{}]", course.title, course.id);
        println!("  {}", course.description);
        for feature in course.features {
            println!("  • {feature}");
        }
    }

    println!();
    for format in &catalog::FORMATS {
        println!(
            "{} ({}): {}",
            format.title,
            format.kind.as_str(),
            format.description
        );
    }
}

fn init_config() -> Result<()> {
    let path = Config::path()?;
    if path.exists() {
        info!("config already present");
    } else {
        Config::new().save_to(&path)?;
        info!("wrote default config");
    }
    println!("{}", path.display());
    Ok(())
}
