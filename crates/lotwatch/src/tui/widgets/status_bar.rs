use lotwatch_app::LotSource;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::super::view::Ui;

impl<S: LotSource> Ui<S> {
    /// Screen title with the last-update line.
    pub(in crate::tui) fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let palette = self.palette();
        let screen = self.nav.current();
        let lines = vec![
            Line::from(vec![
                Span::styled(screen.title(), palette.title()),
                Span::styled(format!("  ({} theme)", self.theme), palette.muted()),
            ]),
            Line::styled(self.schedule.status_line(self.now), palette.muted()),
        ];
        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(palette.border()),
        );
        f.render_widget(header, area);
    }

    /// Key help and the transient message.
    pub(in crate::tui) fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let palette = self.palette();
        let help = self.keybindings.generate_help_text(self.view_type());
        let message = self.message.as_ref().map_or_else(
            || Line::raw(""),
            |msg| Line::styled(msg.text.as_str(), msg.style(&palette)),
        );
        let footer = Paragraph::new(vec![Line::styled(help, palette.muted()), message]).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(palette.border()),
        );
        f.render_widget(footer, area);
    }
}
