use lotwatch_app::LotSource;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::super::constants::{LOT_LIST_BAR_WIDTH, LOT_LIST_HIGHLIGHT_SYMBOL};
use super::super::view::Ui;
use super::util::{truncate_with_ellipsis, usage_bar};

impl<S: LotSource> Ui<S> {
    pub(in crate::tui) fn draw_lot_list(&self, f: &mut Frame<'_>, area: Rect) {
        let palette = self.palette();
        let name_width = usize::from(area.width.saturating_sub(4));

        let items: Vec<ListItem<'_>> = if self.app.lots.is_empty() {
            vec![ListItem::new(Line::styled("No parking lots", palette.muted()))]
        } else {
            self.app
                .lots
                .iter()
                .map(|row| {
                    let tier_style = palette.tier_style(row.occupancy.tier);
                    let free_percent = row
                        .lot
                        .availability()
                        .map_or(0, |occupancy| occupancy.rounded_percentage());
                    let title = Line::from(vec![
                        Span::styled("● ", tier_style),
                        Span::styled(
                            truncate_with_ellipsis(&row.lot.name, name_width).into_owned(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]);
                    let meta = Line::from(vec![
                        Span::styled(
                            format!("  {} spots available · ", row.occupancy.available),
                            palette.muted(),
                        ),
                        Span::styled(format!("{free_percent}% free  "), tier_style),
                        Span::styled(
                            usage_bar(row.occupancy.gauge_ratio(), LOT_LIST_BAR_WIDTH),
                            tier_style,
                        ),
                    ]);
                    ListItem::new(vec![title, meta])
                })
                .collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(Span::styled("Parking Lots", palette.title()))
                    .borders(Borders::ALL)
                    .border_style(palette.border()),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(LOT_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if !self.app.lots.is_empty() {
            state.select(Some(self.app.selected_index()));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}
