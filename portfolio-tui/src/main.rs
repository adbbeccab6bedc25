mod actions;
mod app;
mod cli;
mod logo;
mod palette;
mod ui;

use actions::Action;
use app::{App, FormKind};
use clap::Parser;
use cli::Cli;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, execute};
use log::info;
use portfolio::config::PortfolioConfig;
use ratatui::{prelude::*, Terminal};
use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;

/// The terminal belongs to the UI, so logs never go to stdout or stderr.
/// Without a log file they are discarded.
fn log_target(cfg: &PortfolioConfig) -> std::io::Result<env_logger::Target> {
    let sink: Box<dyn Write + Send> = match &cfg.log_file {
        Some(path) => Box::new(OpenOptions::new().create(true).append(true).open(path)?),
        None => Box::new(std::io::sink()),
    };
    Ok(env_logger::Target::Pipe(sink))
}

fn init_logger(cfg: &PortfolioConfig) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&cfg.log_level);
    builder.target(log_target(cfg)?);
    builder.try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cfg = Cli::parse().resolve()?;
    init_logger(&cfg)?;
    info!("portfolio-tui starting against {}", cfg.base_url);

    let mut app = App::new(&cfg)?;
    app.refresh().await;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    if let Err(e) = res {
        eprintln!("{:?}", e);
    }
    info!("portfolio-tui exiting");
    Ok(())
}

/// Each key is handled to completion, including its request, before the
/// next one is read, so responses are applied in the order they were asked for.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;
        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let event::Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != event::KeyEventKind::Press {
            continue;
        }
        if let Some(form) = app.form.as_mut() {
            match key.code {
                event::KeyCode::Esc => app.close_form(),
                event::KeyCode::Enter => app.submit_form().await,
                event::KeyCode::Tab | event::KeyCode::Up | event::KeyCode::Down => form.next_field(),
                event::KeyCode::Backspace => form.backspace(),
                event::KeyCode::Char(c) => form.input_char(c),
                _ => {}
            }
            continue;
        }
        match Action::from_key(key) {
            Action::Quit => return Ok(()),
            Action::Refresh => app.refresh().await,
            Action::PrevBackground => app.prev_background(),
            Action::NextBackground => app.next_background(),
            Action::RandomFact => app.random_fact(),
            Action::NewComment => app.open_form(FormKind::Comment),
            Action::Rename => app.open_form(FormKind::Rename),
            Action::SetMaxCount => app.open_form(FormKind::MaxCount),
            Action::DeleteAll => app.delete_all().await,
            Action::CycleSort => app.cycle_sort().await,
            Action::ScrollUp => app.scroll_up(),
            Action::ScrollDown => app.scroll_down(),
            Action::None => {}
        }
    }
}
