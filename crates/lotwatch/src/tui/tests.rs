use super::app::App;
use super::view::Ui;
use super::widgets::{truncate_with_ellipsis, usage_bar};
use crate::config::KeyBindingsConfig;
use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lotwatch_app::{LotSource, MockLotSource, ParkingService, Screen, Theme};
use lotwatch_core::{CampusEvent, HourlySample, ParkingLot};
use ratatui::{Terminal, backend::TestBackend};
use std::borrow::Cow;
use std::cell::Cell;
use std::fmt::Display;
use std::rc::Rc;
use std::result::Result as StdResult;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

const START: OffsetDateTime = datetime!(2024-07-15 09:00 UTC);

fn expect_ok<T, E: Display>(result: StdResult<T, E>, ctx: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{ctx}: {err}"),
    }
}

fn expect_some<T>(value: Option<T>, ctx: &str) -> T {
    value.map_or_else(|| panic!("{ctx}"), |inner| inner)
}

/// Delegates to the bundled data while `online` is set.
struct FlakySource {
    online: Rc<Cell<bool>>,
    inner: MockLotSource,
}

impl FlakySource {
    fn new(online: bool) -> (Self, Rc<Cell<bool>>) {
        let flag = Rc::new(Cell::new(online));
        let source = Self {
            online: Rc::clone(&flag),
            inner: MockLotSource::default(),
        };
        (source, flag)
    }

    fn check(&self) -> Result<()> {
        if self.online.get() {
            Ok(())
        } else {
            Err(anyhow!("network unreachable"))
        }
    }
}

impl LotSource for FlakySource {
    fn list_lots(&self) -> Result<Vec<ParkingLot>> {
        self.check()?;
        self.inner.list_lots()
    }

    fn hourly_usage(&self, lot: &ParkingLot) -> Result<Vec<HourlySample>> {
        self.check()?;
        self.inner.hourly_usage(lot)
    }

    fn upcoming_events(&self) -> Result<Vec<CampusEvent>> {
        self.check()?;
        self.inner.upcoming_events()
    }
}

fn ui_with<S: LotSource>(source: S) -> Ui<S> {
    Ui::new(
        App::new(ParkingService::new(source)),
        Theme::Light,
        Duration::minutes(5),
        KeyBindingsConfig::default(),
        START,
    )
}

fn mock_ui() -> Ui<MockLotSource> {
    ui_with(MockLotSource::default())
}

fn press<S: LotSource>(ui: &mut Ui<S>, code: KeyCode) {
    ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn render<S: LotSource>(ui: &Ui<S>) -> String {
    render_sized(ui, 80, 30)
}

fn render_sized<S: LotSource>(ui: &Ui<S>, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = expect_ok(Terminal::new(backend), "create terminal");
    expect_ok(terminal.draw(|f| ui.draw(f)), "draw frame");
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn startup_lists_lots_with_update_status() {
    let ui = mock_ui();
    assert_eq!(ui.nav.current(), &Screen::Home);
    assert_eq!(ui.app.lots.len(), 3);

    let screen = render(&ui);
    assert!(screen.contains("Parking Status"));
    assert!(screen.contains("Structure A"));
    assert!(screen.contains("4 spots available · 1% free  ██████████"));
    assert!(screen.contains("Visitor Lot"));
    assert!(screen.contains("Updated Just now · Next update in 5m"));
    assert!(screen.contains("j:down k:up"));
}

#[test]
fn open_lot_then_history_and_back() {
    let mut ui = mock_ui();
    press(&mut ui, KeyCode::Enter);
    assert_eq!(
        ui.nav.current(),
        &Screen::LotDetails {
            lot_id: "a".to_owned()
        }
    );
    let screen = render(&ui);
    assert!(screen.contains("4 spots left"));
    assert!(screen.contains("12 people viewing this lot"));
    assert!(screen.contains("In 3 hours"));
    assert!(screen.contains("26 in queue"));
    assert!(screen.contains("[h] View Historical Data"));

    press(&mut ui, KeyCode::Char('h'));
    assert_eq!(
        ui.nav.current(),
        &Screen::History {
            lot_id: "a".to_owned()
        }
    );
    let screen = render(&ui);
    assert!(screen.contains("Peak Time   12 PM"));
    assert!(screen.contains("Average     58%"));
    assert!(screen.contains("100% full  0 spots free"));
    assert!(screen.contains("420 spots free"));

    press(&mut ui, KeyCode::Esc);
    press(&mut ui, KeyCode::Backspace);
    assert_eq!(ui.nav.current(), &Screen::Home);
    assert_eq!(ui.nav.depth(), 1);
    assert!(!ui.should_quit);

    press(&mut ui, KeyCode::Char('q'));
    assert!(ui.should_quit);
}

#[test]
fn selection_moves_and_clamps() {
    let mut ui = mock_ui();
    press(&mut ui, KeyCode::Up);
    assert_eq!(ui.app.selected_index(), 0);
    for _ in 0..5 {
        press(&mut ui, KeyCode::Char('j'));
    }
    assert_eq!(ui.app.selected_index(), 2);

    press(&mut ui, KeyCode::Char('k'));
    press(&mut ui, KeyCode::Char('l'));
    let detail = expect_some(ui.app.detail.as_ref(), "detail loaded");
    assert_eq!(detail.lot.name, "Structure B");
}

#[test]
fn events_screen_shows_impacts() {
    let mut ui = mock_ui();
    press(&mut ui, KeyCode::Char('e'));
    assert_eq!(ui.nav.current(), &Screen::Events);

    let screen = render(&ui);
    assert!(screen.contains("Engineering Career Fair"));
    assert!(screen.contains("Entire Campus · 5,000 expected"));
    assert!(screen.contains("100% expected"));

    // Eighteen lines fit in the 80x30 pane, so there is nothing to scroll.
    press(&mut ui, KeyCode::Char('j'));
    assert_eq!(ui.scroll_offset, 0);

    press(&mut ui, KeyCode::Char('q'));
    assert_eq!(ui.nav.current(), &Screen::Home);
}

#[test]
fn events_scroll_stops_at_last_line() {
    let mut ui = mock_ui();
    press(&mut ui, KeyCode::Char('e'));
    // 16 rows leave a main pane of 8, six inside the border.
    render_sized(&ui, 80, 16);
    assert_eq!(ui.max_scroll(), 12);

    for _ in 0..20 {
        press(&mut ui, KeyCode::Char('j'));
    }
    assert_eq!(ui.scroll_offset, 12);
    assert!(render_sized(&ui, 80, 16).contains("Bayliss Parking"));

    press(&mut ui, KeyCode::Char('k'));
    assert_eq!(ui.scroll_offset, 11);
}

#[test]
fn history_scroll_is_bounded() {
    let mut ui = mock_ui();
    press(&mut ui, KeyCode::Enter);
    press(&mut ui, KeyCode::Char('h'));
    render_sized(&ui, 80, 16);
    assert_eq!(ui.max_scroll(), 8);

    for _ in 0..10 {
        press(&mut ui, KeyCode::Down);
    }
    assert_eq!(ui.scroll_offset, 8);
    assert!(render_sized(&ui, 80, 16).contains("6 PM"));
}

#[test]
fn theme_toggle_is_available_everywhere() {
    let mut ui = mock_ui();
    press(&mut ui, KeyCode::Char('t'));
    assert_eq!(ui.theme, Theme::Dark);
    let message = expect_some(ui.message.as_ref(), "toggle message");
    assert_eq!(message.text, "Switched to dark theme");

    press(&mut ui, KeyCode::Enter);
    press(&mut ui, KeyCode::Char('T'));
    assert_eq!(ui.theme, Theme::Light);
    assert!(render(&ui).contains("(light theme)"));
}

#[test]
fn key_release_is_ignored() {
    let mut ui = mock_ui();
    ui.handle_key(KeyEvent::new_with_kind(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert!(!ui.should_quit);
}

#[test]
fn unreachable_source_shows_connection_error_until_retry_succeeds() {
    let (source, online) = FlakySource::new(false);
    let mut ui = ui_with(source);
    assert!(matches!(ui.nav.current(), Screen::ConnectionError { .. }));

    let screen = render(&ui);
    assert!(screen.contains("Connection Error"));
    assert!(screen.contains("Unable to connect to parking services"));
    assert!(screen.contains("[r] Try Again"));
    assert!(screen.contains("network unreachable"));

    press(&mut ui, KeyCode::Char('r'));
    assert!(matches!(ui.nav.current(), Screen::ConnectionError { .. }));
    assert_eq!(ui.nav.depth(), 2);

    online.set(true);
    press(&mut ui, KeyCode::Enter);
    assert_eq!(ui.nav.current(), &Screen::Home);
    assert_eq!(ui.app.lots.len(), 3);
    let message = expect_some(ui.message.as_ref(), "retry message");
    assert_eq!(message.text, "Connected");
}

#[test]
fn losing_the_source_while_browsing_shows_error() {
    let (source, online) = FlakySource::new(true);
    let mut ui = ui_with(source);
    press(&mut ui, KeyCode::Enter);
    online.set(false);
    press(&mut ui, KeyCode::Char('h'));
    assert!(matches!(ui.nav.current(), Screen::ConnectionError { .. }));

    press(&mut ui, KeyCode::Char('q'));
    assert!(ui.should_quit);
}

#[test]
fn domain_errors_stay_on_screen() {
    let source = MockLotSource::with_lots(vec![ParkingLot::new("z", "Closed", 0, 0)]);
    let ui = ui_with(source);
    assert_eq!(ui.nav.current(), &Screen::Home);
    let message = expect_some(ui.message.as_ref(), "error message");
    assert!(message.text.contains("cannot classify lot 'z'"));
    assert!(render(&ui).contains("No parking lots"));
}

#[test]
fn open_without_lots_reports_error() {
    let mut ui = ui_with(MockLotSource::with_lots(Vec::new()));
    press(&mut ui, KeyCode::Enter);
    assert_eq!(ui.nav.current(), &Screen::Home);
    let message = expect_some(ui.message.as_ref(), "error message");
    assert_eq!(message.text, "No lot selected");
}

#[test]
fn tick_refreshes_when_due() {
    let mut ui = mock_ui();
    ui.tick(START + Duration::minutes(2));
    assert_eq!(ui.schedule.last_updated(), START);
    assert!(render(&ui).contains("Updated 2m ago · Next update in 3m"));

    let later = START + Duration::minutes(5);
    ui.tick(later);
    assert_eq!(ui.schedule.last_updated(), later);
    assert!(render(&ui).contains("Updated Just now · Next update in 5m"));
}

#[test]
fn tick_does_not_retry_on_error_screen() {
    let (source, online) = FlakySource::new(false);
    let mut ui = ui_with(source);
    online.set(true);
    ui.tick(START + Duration::minutes(10));
    assert!(matches!(ui.nav.current(), Screen::ConnectionError { .. }));
    assert_eq!(ui.schedule.last_updated(), START);
}

#[test]
fn failed_refresh_waits_for_next_interval() {
    let source = MockLotSource::with_lots(vec![ParkingLot::new("z", "Closed", 0, 0)]);
    let mut ui = ui_with(source);
    let first_due = START + Duration::minutes(5);
    ui.tick(first_due);
    assert!(ui.message.is_some());
    assert_eq!(ui.schedule.last_updated(), START);
    assert_eq!(ui.schedule.next_refresh(), first_due + Duration::minutes(5));

    ui.message = None;
    ui.tick(first_due + Duration::seconds(1));
    assert!(ui.message.is_none());
    assert_eq!(ui.nav.current(), &Screen::Home);
}

#[test]
fn refresh_keeps_selected_lot() {
    let mut ui = mock_ui();
    press(&mut ui, KeyCode::Down);
    press(&mut ui, KeyCode::Char('r'));
    assert_eq!(ui.app.selected_index(), 1);
    let message = expect_some(ui.message.as_ref(), "refresh message");
    assert_eq!(message.text, "Lot data refreshed");
}

#[test]
fn truncate_with_ellipsis_returns_borrowed_when_short() {
    let title = "Visitor Lot";
    assert!(matches!(
        truncate_with_ellipsis(title, 20),
        Cow::Borrowed(result) if result == title
    ));
}

#[test]
fn truncate_with_ellipsis_shortens_long_names() {
    assert_eq!(truncate_with_ellipsis("Engineering Career Fair", 10), "Enginee...");
    assert_eq!(truncate_with_ellipsis("Reid Library", 2), "Re");
    assert_eq!(truncate_with_ellipsis("Reid Library", 0), "");
}

#[test]
fn usage_bar_fills_proportionally() {
    assert_eq!(usage_bar(0.5, 4), "██░░");
    assert_eq!(usage_bar(1.7, 3), "███");
    assert_eq!(usage_bar(f64::NAN, 2), "░░");
}
