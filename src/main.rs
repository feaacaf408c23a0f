//! ArXiv Agent: research questions answered from arXiv papers
//!
//! Usage:
//!   arxiv-agent                     - Open the window
//!   arxiv-agent search <question>   - Print an answer with references
//!   arxiv-agent status              - Check the backend
//!   arxiv-agent help                - Show help

mod app;
mod backend;
mod commands;
mod config;
mod ui;

use std::env;

use app::ArxivAgent;
use backend::api::BackendClient;
use backend::sidecar::Sidecar;
use commands::Command;
use config::Settings;
use iced::{window, Size};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    let settings = config::load_settings();

    match Command::parse(&args[..]) {
        Command::Gui => start_gui(settings),
        Command::Search { question } => {
            run_headless(&settings, |client| async move {
                match client.search(&question).await {
                    Ok(response) => print!("{}", commands::render_report(&response)),
                    Err(e) => eprintln!("Error: {}", e),
                }
            });
            Ok(())
        }
        Command::Status => {
            run_headless(&settings, |client| async move {
                match client.health_check().await {
                    Ok(health) => println!("Backend at {} is up: {}", client.base_url(), health.message),
                    Err(e) => eprintln!("Backend at {} is not reachable: {}", client.base_url(), e),
                }
            });
            Ok(())
        }
        Command::Help => {
            println!("{}", Command::help_text());
            Ok(())
        }
        Command::Usage(usage) => {
            eprintln!("{}", usage);
            Ok(())
        }
        Command::Unknown(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run 'arxiv-agent help' for usage");
            Ok(())
        }
    }
}

fn run_headless<F, Fut>(settings: &Settings, run: F)
where
    F: FnOnce(BackendClient) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let client = BackendClient::with_timeout(&settings.backend.url, settings.backend.timeout);
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(run(client)),
        Err(e) => eprintln!("Failed to create tokio runtime: {}", e),
    }
}

fn start_gui(settings: Settings) -> iced::Result {
    tracing::info!("Starting ArXiv Agent against {}", settings.backend.url);

    let mut sidecar = Sidecar::from_settings(&settings.backend);
    if let Some(sidecar) = sidecar.as_mut() {
        if let Err(e) = sidecar.start() {
            tracing::warn!("Could not start backend: {}", e);
        }
    }

    let size = Size::new(settings.window.width, settings.window.height);
    let result = iced::application(ArxivAgent::title, ArxivAgent::update, ArxivAgent::view)
        .subscription(ArxivAgent::subscription)
        .theme(ArxivAgent::theme)
        .window(window::Settings {
            size,
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || ArxivAgent::new(&settings));

    drop(sidecar);
    result
}
