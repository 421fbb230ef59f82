//! Interactive terminal dashboard.

use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lotwatch_app::{AppConfig, LotSource, ParkingService, Theme};
use ratatui::{Terminal, backend::CrosstermBackend};
use time::OffsetDateTime;
use tracing::subscriber::NoSubscriber;

use crate::config::keybindings::{KeyBindingsConfig, load_config, validate_tui_config};

mod app;
pub mod constants;
mod handlers;
mod theme;
mod view;
mod widgets;

use self::app::App;
use self::constants::TUI_TICK_RATE_MS;
use self::view::Ui;

/// Launch the interactive TUI.
pub fn run<S: LotSource>(
    service: ParkingService<S>,
    config: &AppConfig,
    theme: Option<Theme>,
    config_path: Option<&Path>,
) -> Result<()> {
    let keybindings = load_keybindings(config_path)?;
    let theme = theme.unwrap_or(config.display.theme);
    let refresh_interval = config.display.refresh_interval();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        let ui = Ui::new(
            App::new(service),
            theme,
            refresh_interval,
            keybindings,
            OffsetDateTime::now_utc(),
        );
        run_event_loop(&mut terminal, ui)
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn load_keybindings(config_path: Option<&Path>) -> Result<KeyBindingsConfig> {
    let Some(path) = config_path else {
        return Ok(KeyBindingsConfig::default());
    };
    match load_config(path)? {
        Some(config) => {
            validate_tui_config(&config.tui)?;
            Ok(config.tui.keybindings)
        }
        None => Ok(KeyBindingsConfig::default()),
    }
}

fn run_event_loop<S: LotSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut ui: Ui<S>,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)?
            && let CrosstermEvent::Key(key) = event::read()?
        {
            ui.handle_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick(OffsetDateTime::now_utc());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
