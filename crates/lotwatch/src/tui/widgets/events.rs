use lotwatch_app::{EventReport, LotSource};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::super::constants::USAGE_BAR_WIDTH;
use super::super::theme::Palette;
use super::super::view::Ui;
use super::lot_detail::section_block;
use super::util::{fit, usage_bar};
use crate::commands::format_thousands;

impl<S: LotSource> Ui<S> {
    pub(in crate::tui) fn draw_events(&self, f: &mut Frame<'_>, area: Rect) {
        let palette = self.palette();
        let paragraph = Paragraph::new(self.events_lines())
            .block(section_block("This Week", &palette))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0));
        f.render_widget(paragraph, area);
    }

    pub(in crate::tui) fn events_lines(&self) -> Vec<Line<'_>> {
        let palette = self.palette();
        if self.app.events.is_empty() {
            return vec![Line::styled("No upcoming events", palette.muted())];
        }
        self.app
            .events
            .iter()
            .enumerate()
            .flat_map(|(index, report)| {
                let spacer = (index > 0).then(|| Line::raw(""));
                spacer.into_iter().chain(event_lines(report, &palette))
            })
            .collect()
    }
}

fn event_lines<'a>(report: &'a EventReport, palette: &Palette) -> Vec<Line<'a>> {
    let event = &report.event;
    let mut lines = vec![
        Line::styled(
            event.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(format!("{} · {}", event.date, event.time), palette.muted()),
        Line::styled(
            format!(
                "{} · {} expected",
                event.location,
                format_thousands(u64::from(event.expected_attendance))
            ),
            palette.muted(),
        ),
    ];
    lines.extend(report.impacts.iter().map(|impact| {
        let tier_style = palette.tier_style(impact.tier);
        let ratio = f64::from(impact.lot.expected_occupancy) / 100.0;
        Line::from(vec![
            Span::raw(format!("  {}", fit(&impact.lot.name, 18))),
            Span::styled(usage_bar(ratio, USAGE_BAR_WIDTH), tier_style),
            Span::styled(format!(" {:>3}% expected", impact.lot.expected_occupancy), tier_style),
        ])
    }));
    lines
}
