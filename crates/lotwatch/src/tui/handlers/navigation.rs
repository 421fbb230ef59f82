use crossterm::event::{KeyEvent, KeyEventKind};
use lotwatch_app::{LotSource, Screen};

use super::super::view::Ui;
use crate::config::Action;

impl<S: LotSource> Ui<S> {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let view = self.view_type();
        if let Some(action) = self.keybindings.action_for(view, &key) {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Down => self.app.select_next(),
            Action::Up => self.app.select_prev(),
            Action::Open => self.open_selected_lot(),
            Action::ShowEvents => self.open_events(),
            Action::ShowHistory => self.open_history(),
            Action::Refresh => {
                tracing::debug!("manual refresh");
                if self.reload() {
                    self.info("Lot data refreshed");
                }
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
                tracing::debug!(theme = %self.theme, "theme toggled");
                self.info(format!("Switched to {} theme", self.theme));
            }
            Action::Back => self.go_back(),
            Action::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(1).min(self.max_scroll());
            }
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Action::Retry => {
                if self.reload() {
                    self.info("Connected");
                }
            }
        }
    }

    fn open_selected_lot(&mut self) {
        let Some(lot_id) = self.app.selected_lot().map(|row| row.lot.id.clone()) else {
            self.error("No lot selected");
            return;
        };
        match self.app.load_detail(&lot_id) {
            Ok(()) => self.show(Screen::LotDetails { lot_id }),
            Err(err) => self.fail(&err),
        }
    }

    fn open_history(&mut self) {
        let Screen::LotDetails { lot_id } = self.nav.current() else {
            return;
        };
        let lot_id = lot_id.clone();
        match self.app.load_history(&lot_id) {
            Ok(()) => self.show(Screen::History { lot_id }),
            Err(err) => self.fail(&err),
        }
    }

    fn open_events(&mut self) {
        match self.app.load_events() {
            Ok(()) => self.show(Screen::Events),
            Err(err) => self.fail(&err),
        }
    }

    fn show(&mut self, screen: Screen) {
        self.nav.push(screen);
        self.scroll_offset = 0;
    }

    fn go_back(&mut self) {
        if self.nav.pop().is_none() {
            self.should_quit = true;
            return;
        }
        self.scroll_offset = 0;
    }
}
