//! Fetch a repository's directory tree from a `/tree` server and render it
//! as indented text with folder/file icons.
//!
//! Run with a repository URL to print its tree once.
//! Run without one (or with `--tui`) for the interactive view.
//! Run `serve` to host the `/tree` endpoint itself.

mod app;
mod config;
mod core;
mod server;
mod ui;

use std::io::{self, stderr};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    fetch_runtime::{spawn_fetch, FetchUpdate},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::{
    fetch::{fetch_and_render, TreeClient},
    output::TerminalSink,
};
use crate::server::ServerState;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Render a repository's directory tree")]
struct Cli {
    /// Repository URL to request (e.g. `https://github.com/owner/repo`).
    repo_url: Option<String>,

    /// Base URL of the tree server (overrides the config file).
    #[arg(long)]
    server: Option<String>,

    /// Open the interactive view, with REPO_URL (if any) pre-filled.
    #[arg(long)]
    tui: bool,

    /// Print the effective configuration and exit.
    #[arg(long = "dump-config")]
    dump_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the `/tree` endpoint.
    Serve {
        /// Address to listen on (overrides the config file).
        #[arg(long)]
        listen: Option<SocketAddr>,

        /// Serve files from this directory on every other path.
        #[arg(long = "static-dir")]
        static_dir: Option<PathBuf>,
    },
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr only when RUST_LOG is set; stdout is for the tree.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(server) = cli.server {
        config.server = server;
    }

    if cli.dump_config {
        print!("{}", config.serialise());
        return Ok(ExitCode::SUCCESS);
    }

    match (cli.command, cli.repo_url) {
        (Some(Command::Serve { listen, static_dir }), _) => {
            let addr = listen.unwrap_or(config.listen);
            server::run(addr, ServerState::new(config.github_base), static_dir).await?;
            Ok(ExitCode::SUCCESS)
        }
        (None, Some(url)) if !cli.tui => run_once(&config, &url).await,
        (None, url) => {
            run_tui(config, url.unwrap_or_default()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// One fetch, printed to the terminal.  The error has already been shown
/// through the sink, so failure only sets the exit status.
async fn run_once(config: &AppConfig, repo_url: &str) -> Result<ExitCode> {
    let client = TreeClient::new(&config.server)?;
    let mut sink = TerminalSink::stdio();
    match fetch_and_render(&client, repo_url, &mut sink).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

// ───────────────────────────────────────── interactive ──────

async fn run_tui(config: AppConfig, initial_url: String) -> Result<()> {
    let client = TreeClient::new(&config.server)?;
    let mut state = AppState::new(initial_url, config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut state, &client).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    result?;

    // Leave the last output behind on stdout.
    let text = state.output_text();
    if !text.is_empty() {
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
    client: &TreeClient,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (fetch_tx, mut fetch_rx) = tokio::sync::mpsc::unbounded_channel::<FetchUpdate>();

    loop {
        terminal.draw(|frame| ui::screen::draw(frame, state))?;

        // Start a requested fetch after the draw so `Loading...` shows on
        // the next frame without waiting for the network.
        if let Some((generation, url)) = state.begin_fetch() {
            tracing::debug!("fetch #{generation}: {url}");
            spawn_fetch(fetch_tx.clone(), generation, client.clone(), url);
            continue;
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Paste(text) => handler::handle_paste(state, &text),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => state.tick = state.tick.wrapping_add(1),
                }
            }

            Some(update) = fetch_rx.recv() => {
                state.finish_fetch(update.generation, update.display);
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &str) -> AppConfig {
        AppConfig {
            server: server.to_string(),
            ..AppConfig::default()
        }
    }

    fn same(a: ExitCode, b: ExitCode) -> bool {
        format!("{a:?}") == format!("{b:?}")
    }

    #[tokio::test]
    async fn run_once_reports_failure_as_exit_status() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let code = run_once(&config_for(&server.uri()), "https://github.com/o/r")
            .await
            .unwrap();
        assert!(same(code, ExitCode::FAILURE));
    }

    #[tokio::test]
    async fn run_once_succeeds_on_tree() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"name":"r","is_dir":true}"#),
            )
            .mount(&server)
            .await;

        let code = run_once(&config_for(&server.uri()), "https://github.com/o/r")
            .await
            .unwrap();
        assert!(same(code, ExitCode::SUCCESS));
    }

    #[test]
    fn bad_server_url_is_an_error_not_an_exit_code() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let res = rt.block_on(run_once(&config_for("not a url"), "x"));
        assert!(res.is_err());
    }
}
