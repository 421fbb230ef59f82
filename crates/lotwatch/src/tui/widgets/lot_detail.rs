use lotwatch_app::{LotDetail, LotSource};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::super::constants::USAGE_BAR_WIDTH;
use super::super::theme::Palette;
use super::super::view::Ui;
use super::util::{fit, usage_bar};
use crate::config::{Action, ViewType};

impl<S: LotSource> Ui<S> {
    pub(in crate::tui) fn draw_lot_detail(&self, f: &mut Frame<'_>, area: Rect) {
        let palette = self.palette();
        let Some(detail) = &self.app.detail else {
            f.render_widget(Paragraph::new("Loading lot...").style(palette.muted()), area);
            return;
        };

        let prediction_rows = u16::try_from(detail.predictions.len()).unwrap_or(u16::MAX);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Length(prediction_rows.saturating_add(2)),
                Constraint::Min(3),
            ])
            .split(area);

        f.render_widget(status_paragraph(detail, &palette), chunks[0]);

        let occupancy = &detail.occupancy;
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border())
                    .title("Usage"),
            )
            .gauge_style(palette.tier_style(occupancy.tier).bg(palette.background))
            .ratio(occupancy.gauge_ratio())
            .label(format!("{}% full", occupancy.rounded_percentage()));
        f.render_widget(gauge, chunks[1]);

        let lines: Vec<Line<'_>> = detail
            .predictions
            .iter()
            .map(|row| {
                let occupancy = &row.occupancy;
                let mut spans = vec![
                    Span::raw(fit(&format!("In {}", row.prediction.horizon), 12)),
                    Span::styled(
                        usage_bar(occupancy.gauge_ratio(), USAGE_BAR_WIDTH),
                        palette.tier_style(occupancy.tier),
                    ),
                    Span::raw(format!(" {:>3}% full", occupancy.rounded_percentage())),
                ];
                if occupancy.is_queued {
                    spans.push(Span::styled(
                        format!(" · {} in queue", occupancy.overflow),
                        palette.tier_style(occupancy.tier),
                    ));
                }
                Line::from(spans)
            })
            .collect();
        f.render_widget(
            Paragraph::new(lines).block(section_block("Predictions", &palette)),
            chunks[2],
        );

        let history_key = self
            .keybindings
            .first_key(ViewType::LotDetails, Action::ShowHistory)
            .unwrap_or("?");
        let actions = Paragraph::new(Line::from(vec![
            Span::styled(format!("[{history_key}] "), palette.title()),
            Span::raw("View Historical Data"),
        ]))
        .block(section_block("Quick Actions", &palette));
        f.render_widget(actions, chunks[3]);
    }
}

fn status_paragraph<'a>(detail: &'a LotDetail, palette: &Palette) -> Paragraph<'a> {
    let occupancy = &detail.occupancy;
    let lines = vec![
        Line::from(Span::styled(
            detail.lot.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} spots left", occupancy.available),
                palette.tier_style(occupancy.tier).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" of {}", detail.lot.total), palette.muted()),
        ]),
        Line::styled(
            format!("{} people viewing this lot", detail.active_viewers),
            palette.muted(),
        ),
    ];
    Paragraph::new(lines).block(section_block("Current Status", palette))
}

pub(super) fn section_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(Span::styled(title, palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border())
}
