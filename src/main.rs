//! Lazismu - the Lazismu Türkiye site in your terminal
//!
//! Launches the interactive page viewer, or runs one page operation and
//! prints the rendered fragments.
//!
//! # Usage
//!
//! ```bash
//! # Launch the viewer on the home page
//! lazismu
//!
//! # Open another page
//! lazismu --page "artikel-detail.html?id=iftaar-kolaborasi"
//!
//! # CLI mode (for automation)
//! lazismu programs --json
//! lazismu news --all
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use lazismu::api::FeedClient;
use lazismu::app::{App, AppEvent};
use lazismu::cli::{Cli, Command, ExitCode, Output};
use lazismu::commands::{self, Context};
use lazismu::logging;
use lazismu::page::{resolve_url, Page};
use lazismu::ui::{render_ui, ScreenMap};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_cli_logging();
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive viewer
        run_tui(cli).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let ctx = Context::from_cli(&cli);

    match cli.command {
        Some(Command::Programs(cmd)) => commands::programs_cmd(cmd, &ctx, &output).await,
        Some(Command::News(cmd)) => commands::news_cmd(cmd, &ctx, &output),
        Some(Command::Article(cmd)) => commands::article_cmd(cmd, &ctx, &output),
        Some(Command::Lang(cmd)) => commands::lang_cmd(cmd, &ctx, &output),
        Some(Command::Theme(cmd)) => commands::theme_cmd(cmd, &ctx, &output),
        Some(Command::Prefs) => commands::prefs_cmd(&ctx, &output),
        // Handled by is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interactive viewer
async fn run_tui(cli: Cli) -> Result<()> {
    match logging::init_tui_logging() {
        Ok(Some(path)) => debug!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Logging disabled: {:#}", e),
    }

    let url = resolve_url(&cli.page).with_context(|| format!("Invalid page {}", cli.page))?;
    let ctx = Context::from_cli(&cli);
    let client = ctx.feed_client();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::load(&url), ctx.preference_store(), ctx.config.clone(), tx.clone());
    app.init();
    if let Some(ref lang) = ctx.lang {
        app.apply_language(lang);
    }
    info!("Viewer started on {}", app.page.location);

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &client, tx, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, async events and rendering
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &FeedClient,
    tx: UnboundedSender<AppEvent>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);
    let mut screen = ScreenMap::default();

    while app.running {
        spawn_program_load(app, client, &tx);

        terminal.draw(|frame| screen = render_ui(frame, app))?;
        app.scroll = app.scroll.min(screen.max_scroll);
        app.report_visibility(&screen.visible);

        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => handle_mouse(app, &screen, mouse),
                _ => {}
            }
        }

        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
    }

    Ok(())
}

/// Start the feed request the page asked for; the result comes back as an event
fn spawn_program_load(app: &mut App, client: &FeedClient, tx: &UnboundedSender<AppEvent>) {
    if !app.take_load_request() {
        return;
    }
    let Some(generation) = app.begin_program_load() else {
        return;
    };
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.fetch().await;
        let _ = tx.send(AppEvent::ProgramsLoaded { generation, result });
    });
}

fn handle_mouse(app: &mut App, screen: &ScreenMap, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => {
            if screen.in_slider(mouse.column, mouse.row) {
                app.slider_pointer_enter();
            } else {
                app.slider_pointer_leave();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(control) = screen.control_at(mouse.column, mouse.row) {
                app.click(control);
            }
        }
        MouseEventKind::ScrollDown => app.scroll = app.scroll.saturating_add(3),
        MouseEventKind::ScrollUp => app.scroll = app.scroll.saturating_sub(3),
        _ => {}
    }
}
