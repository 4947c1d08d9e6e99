// ABOUTME: Entry point for the taglet terminal demo
// ABOUTME: Sets up logging and the terminal, then runs the event loop

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use taglet::{App, TagletConfig, cli::Cli, files, ui};
use taglet_logging::{LoggingConfig, LoggingGuard, error, info, init_subscriber};
use tui::{Terminal, backend::CrosstermBackend};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Config file, then environment, then flags. Nothing is written to the terminal.
fn init_logging(cli: &Cli, from_file: &LoggingConfig) -> Result<Option<LoggingGuard>> {
    let mut config = from_file.clone();
    config.apply_env()?;
    let config = cli.apply_logging(config.for_terminal_ui());

    if config.is_silent() {
        return Ok(None);
    }
    init_subscriber(config).map(Some)
}

fn install_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("Application panic: {info}");
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => app.handle_terminal_event(event),
                Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                None => return Ok(()),
            },
            Some(update) = app.next_fetch_update() => app.apply_fetch_update(update),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TagletConfig::load(path)?,
        None => TagletConfig::default(),
    };
    if let Some(root) = cli.root.clone() {
        config.demo.root = root;
    }

    let _log_guard = init_logging(&cli, &config.logging)?;
    install_panic_handler();

    let source = files::build_source(&config.demo)?;
    let mut app = App::new(&config.autocomplete, Arc::new(source))?;

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app).await;
    app.shutdown();
    restore_terminal(&mut terminal)?;
    result?;

    info!(messages = app.history().len(), "Taglet exiting");
    for line in app.history() {
        println!("{line}");
    }
    Ok(())
}
