mod app;
mod catalog;
mod clock;
mod config;
mod error;
mod frontend;
mod llm;
mod persona;
mod render;
mod session;
mod tui;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use structopt::StructOpt;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use config::{Config, LOG_FILE};
use frontend::{actions, keyboard, mouse};
use render::{render_bot, RenderableReply};
use session::ChatContext;

#[derive(StructOpt, Debug)]
#[structopt(name = "onwear-chat", about = "Chat with the OnWear customer assistant")]
struct Cli {
    /// Proxy endpoint that forwards requests to the language model
    #[structopt(long)]
    endpoint: Option<String>,

    /// Model name sent with every request
    #[structopt(long)]
    model: Option<String>,

    /// Product catalog: a local JSON file or an http(s) URL
    #[structopt(long)]
    catalog: Option<String>,

    /// Directory for the log file (defaults to the system temp dir)
    #[structopt(long, parse(from_os_str))]
    log_dir: Option<PathBuf>,

    /// Ask a single question, print the reply and exit
    #[structopt(long)]
    ask: Option<String>,
}

/// Raw mode + alternate screen for as long as the guard lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    }
}

fn main() -> Result<()> {
    let args = Cli::from_args();
    let config = Config::default().with_overrides(args.endpoint, args.model, args.catalog, args.log_dir);
    let _log_guard = init_logging(&config.log_dir)?;

    info!(endpoint = %config.endpoint, model = %config.model, "starting chat");
    let ctx = Arc::new(ChatContext::new(config));

    if let Some(question) = args.ask {
        return ask_once(&ctx, &question);
    }

    // The first message may go out before the catalog has arrived.
    let loader_ctx = Arc::clone(&ctx);
    thread::Builder::new()
        .name("catalog-loader".into())
        .spawn(move || {
            catalog::load_into(&loader_ctx.config.catalog, &loader_ctx.persona);
        })?;

    run_tui(ctx)
}

/// Logs go to a file so they never draw over the TUI.
fn init_logging(dir: &Path) -> Result<WorkerGuard> {
    let appender = log_file(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("onwear_chat=info")))
        .try_init()
        .context("cannot install log subscriber")?;

    Ok(guard)
}

/// Open `<dir>/onwear-chat.log`, creating `dir` if needed.
fn log_file(dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .with_context(|| format!("cannot open log file in {}", dir.display()))
}

fn ask_once(ctx: &ChatContext, question: &str) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        return Ok(());
    }

    catalog::load_into(&ctx.config.catalog, &ctx.persona);
    // Nothing else touches the buffer here, so it stays locked for the round trip.
    let instructions = ctx.instructions();
    let reply = ctx.client.send(question, &instructions, &mut ctx.buffer());

    let msg = render_bot(&RenderableReply::Paragraphs(reply));
    for line in msg.to_lines() {
        println!("{line}");
    }
    Ok(())
}

fn run_tui(ctx: Arc<ChatContext>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(ctx, tx);

    loop {
        terminal.draw(|f| tui::ui(f, &mut app))?;

        // Apply every reply that arrived since the last frame.
        while let Ok(ev) = rx.try_recv() {
            actions::handle_backend_event(&mut app, ev);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if keyboard::handle_key_event(key, &mut app)? {
                        break;
                    }
                }
                Event::Mouse(me) => mouse::handle_mouse_event(me, &mut app)?,
                _ => {}
            }
        }
    }

    info!("chat closed");
    Ok(())
}
