use std::cell::Cell;
use std::time::{Duration as StdDuration, Instant};

use anyhow::Error;
use lotwatch_app::{LotSource, NavStack, Screen, ServiceError, Theme, UpdateSchedule};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};
use time::{Duration, OffsetDateTime};

use super::app::App;
use super::constants::{FOOTER_HEIGHT, HEADER_HEIGHT, UI_MESSAGE_TTL_SECS};
use super::theme::Palette;
use crate::config::{KeyBindingsConfig, ViewType};

pub(super) struct Ui<S: LotSource> {
    pub(super) app: App<S>,
    pub(super) nav: NavStack,
    pub(super) theme: Theme,
    pub(super) schedule: UpdateSchedule,
    /// Clock reading of the latest tick.
    pub(super) now: OffsetDateTime,
    /// Scroll position of the history and events screens.
    pub(super) scroll_offset: u16,
    /// Inner height of the main pane at the last draw.
    viewport_rows: Cell<u16>,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    pub(super) keybindings: KeyBindingsConfig,
}

impl<S: LotSource> Ui<S> {
    pub(super) fn new(
        app: App<S>,
        theme: Theme,
        refresh_interval: Duration,
        keybindings: KeyBindingsConfig,
        now: OffsetDateTime,
    ) -> Self {
        let mut ui = Self {
            app,
            nav: NavStack::new(),
            theme,
            schedule: UpdateSchedule::new(now, refresh_interval),
            now,
            scroll_offset: 0,
            viewport_rows: Cell::new(0),
            message: None,
            should_quit: false,
            keybindings,
        };
        ui.reload();
        ui
    }

    pub(super) const fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub(super) fn view_type(&self) -> ViewType {
        match self.nav.current() {
            Screen::Home => ViewType::Home,
            Screen::LotDetails { .. } => ViewType::LotDetails,
            Screen::History { .. } => ViewType::History,
            Screen::Events => ViewType::Events,
            Screen::ConnectionError { .. } => ViewType::ConnectionError,
        }
    }

    /// Reload the lot list and whatever the current screen shows.
    ///
    /// Returns `false` when loading failed.
    pub(super) fn reload(&mut self) -> bool {
        let result = self.app.refresh_lots().and_then(|()| match self.nav.current() {
            Screen::LotDetails { lot_id } => self.app.load_detail(lot_id),
            Screen::History { lot_id } => self.app.load_history(lot_id),
            Screen::Events => self.app.load_events(),
            Screen::Home | Screen::ConnectionError { .. } => Ok(()),
        });

        match result {
            Ok(()) => {
                self.schedule.mark_updated(self.now);
                if matches!(self.nav.current(), Screen::ConnectionError { .. }) {
                    self.nav.reset();
                    self.scroll_offset = 0;
                }
                tracing::debug!(lots = self.app.lots.len(), "reloaded lot data");
                true
            }
            Err(err) => {
                self.schedule.mark_attempted(self.now);
                self.fail(&err);
                false
            }
        }
    }

    /// Report a failed load.
    ///
    /// Domain errors stay on the current screen; anything else is treated as
    /// the source being unreachable.
    pub(super) fn fail(&mut self, err: &Error) {
        tracing::warn!(error = %err, "failed to load lot data");
        self.error(format!("{err:#}"));
        if err.downcast_ref::<ServiceError>().is_none() {
            self.nav.push(Screen::connection_error());
        }
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let palette = self.palette();
        let size = f.area();
        f.render_widget(Block::default().style(palette.base()), size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_main(f, chunks[1]);
        self.draw_footer(f, chunks[2]);
    }

    fn draw_main(&self, f: &mut Frame<'_>, area: Rect) {
        self.viewport_rows.set(area.height.saturating_sub(2));
        match self.nav.current() {
            Screen::Home => self.draw_lot_list(f, area),
            Screen::LotDetails { .. } => self.draw_lot_detail(f, area),
            Screen::History { .. } => self.draw_history(f, area),
            Screen::Events => self.draw_events(f, area),
            Screen::ConnectionError { message } => self.draw_connection_error(f, area, message),
        }
    }

    /// Furthest the current screen can scroll before running out of lines.
    pub(super) fn max_scroll(&self) -> u16 {
        let lines = match self.nav.current() {
            Screen::History { .. } => self.history_lines().len(),
            Screen::Events => self.events_lines().len(),
            Screen::Home | Screen::LotDetails { .. } | Screen::ConnectionError { .. } => 0,
        };
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_sub(self.viewport_rows.get())
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    /// Advance the clock, expire messages and refresh when due.
    pub(super) fn tick(&mut self, now: OffsetDateTime) {
        self.now = now;
        if let Some(msg) = &self.message
            && msg.is_expired(StdDuration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
        let on_error_screen = matches!(self.nav.current(), Screen::ConnectionError { .. });
        if !on_error_screen && self.schedule.is_due(now) {
            self.reload();
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self, palette: &Palette) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(palette.low),
            MessageLevel::Error => Style::default().fg(palette.high),
        }
    }

    fn is_expired(&self, ttl: StdDuration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
