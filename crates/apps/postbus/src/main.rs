//! Postbus - a console front-end for the message inbox
//!
//! This is the main entry point for the Postbus application. Pass `--demo`
//! (or set `POSTBUS_DEMO`) to run against an in-memory backend, and
//! `--config <path>` to load the inbox configuration from a specific file.

use inbox::{
    BrowserNavigator, Dialogs, FileTokenStore, HttpMessageService, InMemoryTokenStore, InboxConfig,
    InboxController, MessageService, Navigator, TokenStore,
};
use log::{debug, error, info, warn};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

mod app;
mod demo;
mod dialogs;
mod input;
mod options;
mod views;

use app::{Flow, PostbusApp};
use dialogs::TerminalDialogs;
use options::{Options, USAGE};

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    match config::init() {
        Ok(dir) => debug!("Config directory: {}", dir.root().display()),
        Err(e) => error!("Failed to initialize config directory: {}", e),
    }

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    let config = match options.load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load inbox configuration: {:#}", e);
            if let Some(path) = options.config_path.clone().or_else(InboxConfig::default_config_path) {
                warn!(
                    "Fix the configuration file at {} or set POSTBUS_BASE_URL",
                    path.display()
                );
            }
            return ExitCode::FAILURE;
        }
    };

    let demo_mode = options.demo || std::env::var_os("POSTBUS_DEMO").is_some();

    let (service, tokens, navigator): (
        Arc<dyn MessageService>,
        Arc<dyn TokenStore>,
        Arc<dyn Navigator>,
    ) = if demo_mode {
        info!("Running against the in-memory demo backend");
        (
            Arc::new(demo::seeded_service(&config)),
            Arc::new(InMemoryTokenStore::with_access_token("demo")),
            Arc::new(demo::PrintNavigator),
        )
    } else {
        let service = match HttpMessageService::new(&config) {
            Ok(service) => service,
            Err(e) => {
                error!("Failed to initialize message service: {:#}", e);
                return ExitCode::FAILURE;
            }
        };
        let tokens: Arc<dyn TokenStore> = match FileTokenStore::open_default() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Token store unavailable, continuing without a token: {:#}", e);
                Arc::new(InMemoryTokenStore::new())
            }
        };
        info!("Using backend at {}", config.base_url);
        (Arc::new(service), tokens, Arc::new(BrowserNavigator))
    };

    if tokens.access_token().is_none() {
        warn!("No access token stored, requests are sent without authorization");
    }

    let dialogs: Arc<dyn Dialogs> = Arc::new(TerminalDialogs::stdio());
    let controller = InboxController::new(config, service, tokens, dialogs, navigator);
    let mut app = PostbusApp::new(controller);

    match run(&mut app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Console output failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Prompt loop until `quit` or end of input
fn run(app: &mut PostbusApp) -> io::Result<()> {
    let mut stdout = io::stdout();
    app.start(&mut stdout)?;
    writeln!(stdout, "Type 'help' for the list of commands")?;

    loop {
        write!(stdout, "postbus> ")?;
        stdout.flush()?;

        let Some(line) = input::read_stdin_line() else {
            writeln!(stdout)?;
            return Ok(());
        };

        match input::parse(&line) {
            Ok(Some(command)) => {
                if app.execute(command, &mut stdout)? == Flow::Quit {
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }
}
