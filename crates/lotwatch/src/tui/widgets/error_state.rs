use lotwatch_app::LotSource;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::super::view::Ui;
use super::lot_detail::section_block;
use crate::config::{Action, ViewType};

impl<S: LotSource> Ui<S> {
    pub(in crate::tui) fn draw_connection_error(&self, f: &mut Frame<'_>, area: Rect, message: &str) {
        let palette = self.palette();
        let retry_key = self
            .keybindings
            .first_key(ViewType::ConnectionError, Action::Retry)
            .unwrap_or("?");
        let lines = vec![
            Line::raw(""),
            Line::styled("⚠", palette.tier_style(lotwatch_core::Tier::High)),
            Line::styled(
                "Connection Error",
                palette.tier_style(lotwatch_core::Tier::High).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw(message),
            Line::raw(""),
            Line::from(vec![
                Span::styled(format!("[{retry_key}] "), palette.title()),
                Span::raw("Try Again"),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(section_block("Parking Services", &palette));
        f.render_widget(paragraph, area);
    }
}
