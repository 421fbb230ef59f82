use anyhow::Result;
use lotwatch_app::{EventReport, LotDetail, LotHistory, LotRow, LotSource, ParkingService};

/// Data loaded for the screens, plus the lot list selection.
pub(super) struct App<S: LotSource> {
    service: ParkingService<S>,
    pub(super) lots: Vec<LotRow>,
    pub(super) events: Vec<EventReport>,
    pub(super) detail: Option<LotDetail>,
    pub(super) history: Option<LotHistory>,
    selected: usize,
}

impl<S: LotSource> App<S> {
    pub(super) const fn new(service: ParkingService<S>) -> Self {
        Self {
            service,
            lots: Vec::new(),
            events: Vec::new(),
            detail: None,
            history: None,
            selected: 0,
        }
    }

    /// Reload the lot list, keeping the selected lot when it still exists.
    pub(super) fn refresh_lots(&mut self) -> Result<()> {
        let keep_id = self.selected_lot().map(|row| row.lot.id.clone());
        self.lots = self.service.lot_rows()?;
        self.selected = keep_id
            .and_then(|id| self.lots.iter().position(|row| row.lot.id == id))
            .unwrap_or(0);
        Ok(())
    }

    pub(super) fn load_events(&mut self) -> Result<()> {
        self.events = self.service.events()?;
        Ok(())
    }

    pub(super) fn load_detail(&mut self, lot_id: &str) -> Result<()> {
        self.detail = Some(self.service.lot_detail(lot_id)?);
        Ok(())
    }

    pub(super) fn load_history(&mut self, lot_id: &str) -> Result<()> {
        self.history = Some(self.service.history(lot_id)?);
        Ok(())
    }

    pub(super) const fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn selected_lot(&self) -> Option<&LotRow> {
        self.lots.get(self.selected)
    }

    pub(super) const fn select_next(&mut self) {
        if self.selected + 1 < self.lots.len() {
            self.selected += 1;
        }
    }

    pub(super) const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
