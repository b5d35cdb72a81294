mod cli;
mod client;
mod config;
mod error;
mod models;
mod notifications;
mod render;
mod ui;
mod wizard;

use anyhow::{anyhow, Context};
use chrono::Local;
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Commands};
use client::{format_error, load_image, AnalysisBackend, ApiClient};
use config::Config;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::Season;
use notifications::Notifications;
use ratatui::{backend::CrosstermBackend, Terminal};
use render::{report, ResultsRenderer, ResultsView, TextRenderer};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wizard::{FarmForm, FormField, Wizard, WizardStep};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file.
    init_logging(cli.verbose, cli.command.is_none())?;

    if let Some(Commands::Init) = cli.command {
        let (_, path) = Config::setup_interactive()?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let mut config = match Config::load(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `cropwise init` to create a config file");
            std::process::exit(1);
        }
    };
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    let client = ApiClient::new(&config.server)?;

    match cli.command {
        Some(Commands::Check) => run_check(&client).await,
        Some(Commands::Analyze(args)) => run_analyze(&client, &config, args).await,
        Some(Commands::Init) => Ok(()),
        None => run_tui(&client, &config, cli.image).await,
    }
}

fn init_logging(verbose: u8, to_file: bool) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if to_file {
        let path = Config::log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

async fn run_check(client: &ApiClient) -> anyhow::Result<()> {
    let health = client.check_health().await;
    println!("{}: {}", client.base_url(), health);
    if !health.is_healthy() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_analyze(client: &ApiClient, config: &Config, args: AnalyzeArgs) -> anyhow::Result<()> {
    let season = Season::from_str(&args.season).ok_or_else(|| {
        anyhow!(
            "Unknown season '{}'. Use kharif, rabi or summer",
            args.season
        )
    })?;

    let mut form = FarmForm::from_defaults(&config.farm);
    form.set(FormField::Location, &args.location);
    form.set(FormField::Temperature, &args.temperature);
    form.set(FormField::Rainfall, &args.rainfall);
    form.set(FormField::Humidity, &args.humidity);
    if let Some(ref crop) = args.previous_crop {
        form.set(FormField::PreviousCrop, crop);
    }
    form.season = Some(season);

    let image = load_image(&args.image)
        .await
        .map_err(|e| anyhow!(format_error(&e)))?;
    let submission = form
        .to_submission(image)
        .map_err(|e| anyhow!(format_error(&e)))?;

    eprintln!("Analyzing {}...", args.image.display());
    let result = client
        .submit_analysis(&submission)
        .await
        .map_err(|e| anyhow!(format_error(&e)))?;

    let view = ResultsView::from_result(&result);
    print!("{}", TextRenderer::default().render(&view));

    if args.report {
        let path = report::write_report(&config.report_dir()?, &view, Local::now())?;
        println!();
        println!("Report written to {}", path.display());
    }

    Ok(())
}

async fn run_tui(client: &ApiClient, config: &Config, preload: Option<PathBuf>) -> anyhow::Result<()> {
    let notifications = Notifications::new(Duration::from_secs(config.ui.notification_secs));
    let mut wizard = Wizard::new(config.farm.clone(), notifications);
    let report_dir = config.report_dir()?;

    wizard.check_health(client).await;
    if let Some(path) = preload {
        wizard.queue_image(&path.display().to_string());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut wizard, client, &report_dir).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Tui,
    wizard: &mut Wizard,
    client: &ApiClient,
    report_dir: &Path,
) -> anyhow::Result<()> {
    let mut tick: usize = 0;

    loop {
        wizard.notifications.prune_expired();
        terminal.draw(|f| ui::draw(f, wizard, tick))?;

        if let Some(path) = wizard.take_pending_image() {
            wizard.select_image(&path).await;
            continue;
        }

        if let Some(submission) = wizard.take_pending_submission() {
            let request = client.submit_analysis(&submission);
            tokio::pin!(request);

            // Keep the spinner moving while the request is in flight.
            let outcome = loop {
                tokio::select! {
                    outcome = &mut request => break outcome,
                    _ = tokio::time::sleep(TICK) => {
                        tick = tick.wrapping_add(1);
                        terminal.draw(|f| ui::draw(f, wizard, tick))?;
                    }
                }
            };
            wizard.complete_submission(outcome);

            // Keys pressed during loading are dropped.
            while event::poll(Duration::ZERO)? {
                let _ = event::read()?;
            }
            continue;
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(wizard, key, report_dir) {
                        break;
                    }
                }
                Event::Paste(text) => handle_paste(wizard, &text),
                _ => {}
            }
        }
        tick = tick.wrapping_add(1);
    }

    Ok(())
}

/// Returns true when the app should quit.
fn handle_key(wizard: &mut Wizard, key: KeyEvent, report_dir: &Path) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return true,
            KeyCode::Char('r') => {
                wizard.download_report(report_dir);
                return false;
            }
            _ => {}
        }
    }

    match wizard.step() {
        WizardStep::Upload => handle_upload_input(wizard, key.code),
        WizardStep::Details => handle_details_input(wizard, key.code),
        WizardStep::Loading => {}
        WizardStep::Results => return handle_results_input(wizard, key.code, report_dir),
    }
    false
}

fn handle_paste(wizard: &mut Wizard, text: &str) {
    match wizard.step() {
        WizardStep::Upload => wizard.queue_image(text),
        WizardStep::Details => {
            for c in text.chars().filter(|c| !c.is_control()) {
                wizard.form.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_upload_input(wizard: &mut Wizard, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            if wizard.path_input.trim().is_empty() {
                wizard.go_to_details();
            } else {
                wizard.submit_path_input();
            }
        }
        KeyCode::Tab | KeyCode::Right => {
            wizard.go_to_details();
        }
        KeyCode::Delete => wizard.remove_image(),
        KeyCode::Esc => wizard.path_input.clear(),
        KeyCode::Backspace => {
            wizard.path_input.pop();
        }
        KeyCode::Char(c) => wizard.path_input.push(c),
        _ => {}
    }
}

fn handle_details_input(wizard: &mut Wizard, code: KeyCode) {
    let on_season = wizard.form.focused == FormField::Season;
    match code {
        KeyCode::Up | KeyCode::BackTab => wizard.form.focus_prev(),
        KeyCode::Down | KeyCode::Tab => wizard.form.focus_next(),
        KeyCode::Left if on_season => wizard.form.cycle_season(false),
        KeyCode::Right if on_season => wizard.form.cycle_season(true),
        KeyCode::Char(' ') if on_season => wizard.form.cycle_season(true),
        KeyCode::Char(c) => wizard.form.input_char(c),
        KeyCode::Backspace => wizard.form.backspace(),
        KeyCode::Esc => wizard.back_to_upload(),
        KeyCode::Enter => {
            wizard.begin_submission();
        }
        _ => {}
    }
}

fn handle_results_input(wizard: &mut Wizard, code: KeyCode, report_dir: &Path) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('n') => wizard.reset(),
        KeyCode::Char('d') => {
            wizard.download_report(report_dir);
        }
        _ => {}
    }
    false
}
