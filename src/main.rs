use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use wordmatch::{
    app::{Action, App},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    words::{load_or_fallback, BundledList},
    DistractorPolicy, Session,
};

const TICK_RATE_MS: u64 = 100;

/// vocabulary matching quiz: pick the right translation for each word
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal vocabulary quiz. Each round shows an English word and up to four translations; pick the right one. Score and time are reported at the end of the session."
)]
pub struct Cli {
    /// number of words per session (capped by the word list size)
    #[clap(short = 'n', long)]
    session_length: Option<usize>,

    /// word list to quiz from (.csv, .json, .xlsx, .xls)
    #[clap(short = 'f', long = "file")]
    word_list: Option<PathBuf>,

    /// built-in word list, used when no file is given
    #[clap(short = 'b', long = "bundled", value_enum)]
    bundled_list: Option<BundledList>,

    /// spreadsheet sheet to read (default: the first sheet)
    #[clap(long)]
    sheet: Option<String>,

    /// draw wrong answers from the whole list, not only words still unasked this lap
    #[clap(long)]
    any_distractors: bool,

    /// milliseconds answer feedback stays on screen (0 moves on immediately)
    #[clap(long = "feedback-ms")]
    feedback_ms: Option<u64>,

    /// save these options as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line flags over the stored configuration.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(n) = self.session_length {
            cfg.session_length = n;
        }
        if let Some(path) = &self.word_list {
            cfg.word_list = Some(path.clone());
        }
        if let Some(list) = self.bundled_list {
            cfg.bundled_list = list;
            if self.word_list.is_none() {
                cfg.word_list = None;
            }
        }
        if let Some(sheet) = &self.sheet {
            cfg.sheet = Some(sheet.clone());
        }
        if self.any_distractors {
            cfg.distractors = DistractorPolicy::AnyOther;
        }
        if let Some(ms) = self.feedback_ms {
            cfg.feedback_delay_ms = ms;
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(e) = logging::init(&log_path) {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, format!("cannot open log file: {e}"))
                .exit();
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        if let Err(e) = store.save(&config) {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::Io,
                format!("cannot save config to {}: {e}", store.path().display()),
            )
            .exit();
        }
    }

    let (pool, origin) = load_or_fallback(&config.word_source());
    let session = Session::new(Arc::new(pool), config.session_settings());
    let mut app = App::new(session, origin, config.feedback_delay());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // restore the terminal before reporting any error
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let tick = Duration::from_millis(TICK_RATE_MS);
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick));

    let size = terminal.size()?;
    app.resize(size.width, size.height);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                let now = Instant::now();
                app.on_tick(now - last_tick).inspect_err(|e| {
                    tracing::error!(error = %e, "controller rejected tick");
                })?;
                last_tick = now;
            }
            AppEvent::Resize => {
                let size = terminal.size()?;
                app.resize(size.width, size.height);
            }
            AppEvent::Key(key) => {
                let action = app.on_key(key).inspect_err(|e| {
                    tracing::error!(error = %e, ?key, "controller rejected key");
                })?;
                if action == Action::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}
