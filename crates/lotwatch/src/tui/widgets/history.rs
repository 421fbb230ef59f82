use lotwatch_app::{HistoryRow, LotSource};
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

impl<S: LotSource> Ui<S> {
    pub(in crate::tui) fn draw_history(&self, f: &mut Frame<'_>, area: Rect) {
        let palette = self.palette();
        if self.app.history.is_none() {
            f.render_widget(Paragraph::new("Loading history...").style(palette.muted()), area);
            return;
        }

        let paragraph = Paragraph::new(self.history_lines())
            .block(section_block("Historical Data", &palette))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0));
        f.render_widget(paragraph, area);
    }

    pub(in crate::tui) fn history_lines(&self) -> Vec<Line<'_>> {
        let palette = self.palette();
        let Some(history) = &self.app.history else {
            return Vec::new();
        };

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::styled(format!("{} today", history.lot.name), bold),
            Line::raw(""),
            Line::styled("Overview", palette.title()),
        ];
        match &history.summary {
            Some(summary) => {
                lines.push(overview_line("Peak Time", summary.peak_label.clone()));
                lines.push(overview_line(
                    "Peak Usage",
                    format!("{:.0}%", summary.peak_percentage),
                ));
                lines.push(overview_line(
                    "Average",
                    format!("{}%", summary.average_percentage),
                ));
            }
            None => lines.push(Line::styled("No usage recorded", palette.muted())),
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled("Hourly Breakdown", palette.title()));
        lines.extend(history.rows.iter().map(|row| hourly_line(row, &palette)));
        lines
    }
}

fn overview_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![Span::raw(fit(label, 12)), Span::raw(value)])
}

fn hourly_line<'a>(row: &'a HistoryRow, palette: &Palette) -> Line<'a> {
    let occupancy = &row.occupancy;
    let tier_style = palette.tier_style(occupancy.tier);
    let note = if occupancy.is_queued {
        Span::styled(format!("  {} in queue", occupancy.overflow), tier_style)
    } else {
        Span::styled(format!("  {} spots free", occupancy.available), palette.muted())
    };
    Line::from(vec![
        Span::raw(fit(&row.sample.label, 7)),
        Span::styled(usage_bar(occupancy.gauge_ratio(), USAGE_BAR_WIDTH), tier_style),
        Span::styled(format!(" {:>3}% full", occupancy.rounded_percentage()), tier_style),
        note,
    ])
}
