//! Non-interactive reports.

use std::io::Write;

use anyhow::{Result, bail};
use lotwatch_app::{EventReport, LotDetail, LotHistory, LotRow, LotSource, ParkingService};
use lotwatch_core::Occupancy;
use serde::Serialize;

use crate::Command;

/// Render `command` to `out`.
pub fn run<S: LotSource>(command: Command, service: &ParkingService<S>, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Lots { json } => {
            let rows = service.lot_rows()?;
            emit(out, json, rows.as_slice(), write_lots)
        }
        Command::Show { lot, json } => {
            let detail = service.lot_detail(&lot)?;
            emit(out, json, &detail, write_detail)
        }
        Command::History { lot, json } => {
            let history = service.history(&lot)?;
            emit(out, json, &history, write_history)
        }
        Command::Events { json } => {
            let events = service.events()?;
            emit(out, json, events.as_slice(), write_events)
        }
        Command::Tui { .. } | Command::InitConfig { .. } => {
            bail!("interactive commands are not reports")
        }
    }
}

fn emit<W, T>(out: &mut W, json: bool, value: &T, text: fn(&mut W, &T) -> Result<()>) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    if json {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    } else {
        text(out, value)
    }
}

fn write_lots<W: Write>(out: &mut W, rows: &[LotRow]) -> Result<()> {
    if rows.is_empty() {
        writeln!(out, "No parking lots")?;
        return Ok(());
    }
    let width = rows.iter().map(|row| row.lot.name.chars().count()).max().unwrap_or(0);
    for LotRow { lot, occupancy } in rows {
        writeln!(
            out,
            "{:<3} {:<width$}  {:>5}/{:<5} free  {:>3}% full  {}",
            lot.id,
            lot.name,
            occupancy.available,
            lot.total,
            occupancy.rounded_percentage(),
            occupancy.tier,
        )?;
    }
    Ok(())
}

fn write_detail<W: Write>(out: &mut W, detail: &LotDetail) -> Result<()> {
    let LotDetail {
        lot,
        occupancy,
        active_viewers,
        predictions,
    } = detail;
    writeln!(out, "{} ({})", lot.name, lot.id)?;
    writeln!(out, "  Status:   {}", usage_summary(occupancy))?;
    writeln!(out, "  Free:     {} of {} spots", occupancy.available, lot.total)?;
    writeln!(out, "  Viewing:  {active_viewers} people")?;
    writeln!(out, "Predictions:")?;
    for row in predictions {
        writeln!(
            out,
            "  In {:<8} {} spots used ({})",
            format!("{}:", row.prediction.horizon),
            row.prediction.predicted,
            usage_summary(&row.occupancy),
        )?;
    }
    Ok(())
}

fn write_history<W: Write>(out: &mut W, history: &LotHistory) -> Result<()> {
    writeln!(out, "{} ({}) today", history.lot.name, history.lot.id)?;
    match &history.summary {
        Some(summary) => {
            writeln!(
                out,
                "  Peak:     {} ({:.0}%)",
                summary.peak_label, summary.peak_percentage
            )?;
            writeln!(out, "  Average:  {}%", summary.average_percentage)?;
        }
        None => writeln!(out, "  No usage recorded")?,
    }
    for row in &history.rows {
        writeln!(out, "  {:<6} {}", row.sample.label, usage_summary(&row.occupancy))?;
    }
    Ok(())
}

fn write_events<W: Write>(out: &mut W, events: &[EventReport]) -> Result<()> {
    if events.is_empty() {
        writeln!(out, "No upcoming events")?;
        return Ok(());
    }
    for (index, report) in events.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        let event = &report.event;
        writeln!(out, "{}", event.name)?;
        writeln!(
            out,
            "  {} · {} · {} · {} expected",
            event.date,
            event.time,
            event.location,
            format_thousands(u64::from(event.expected_attendance)),
        )?;
        for impact in &report.impacts {
            writeln!(
                out,
                "  {:<18} {:>3}%  {}",
                impact.lot.name, impact.lot.expected_occupancy, impact.tier
            )?;
        }
    }
    Ok(())
}

/// `"99% full, high"` plus the queue when demand exceeds capacity.
pub fn usage_summary(occupancy: &Occupancy) -> String {
    let text = format!("{}% full, {}", occupancy.rounded_percentage(), occupancy.tier);
    if occupancy.is_queued {
        format!("{text}, {} in queue", occupancy.overflow)
    } else {
        text
    }
}

/// `5000` -> `"5,000"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotwatch_app::MockLotSource;
    use lotwatch_core::ParkingLot;

    fn render(command: Command) -> Result<String> {
        let service = ParkingService::new(MockLotSource::default());
        let mut out = Vec::new();
        run(command, &service, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn lots_text_lists_every_lot_with_tier() -> Result<()> {
        let text = render(Command::Lots { json: false })?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("a   Structure A"));
        assert!(lines[0].ends_with("99% full  high"));
        assert!(lines[1].contains("100/600"));
        assert!(lines[1].ends_with("83% full  medium"));
        assert!(lines[2].ends_with("5% full  low"));
        Ok(())
    }

    #[test]
    fn lots_json_uses_lowercase_tiers() -> Result<()> {
        let text = render(Command::Lots { json: true })?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value[0]["lot"]["id"], "a");
        assert_eq!(value[0]["occupancy"]["tier"], "high");
        assert_eq!(value[2]["occupancy"]["basis"], "occupied");
        Ok(())
    }

    #[test]
    fn show_reports_queue_in_predictions() -> Result<()> {
        let text = render(Command::Show {
            lot: "a".to_owned(),
            json: false,
        })?;
        assert!(text.starts_with("Structure A (a)\n"));
        assert!(text.contains("Viewing:  12 people"));
        assert!(text.contains("In 3 hours: 626 spots used (104% full, high, 26 in queue)"));
        Ok(())
    }

    #[test]
    fn show_unknown_lot_fails() {
        let result = render(Command::Show {
            lot: "nope".to_owned(),
            json: false,
        });
        let Err(err) = result else {
            panic!("unknown lot should fail");
        };
        assert!(err.to_string().contains("'nope' not found"));
    }

    #[test]
    fn history_text_shows_peak_and_full_midday() -> Result<()> {
        let text = render(Command::History {
            lot: "a".to_owned(),
            json: false,
        })?;
        assert!(text.contains("Peak:     12 PM (100%)"));
        assert!(text.contains("Average:  58%"));
        assert!(text.contains("12 PM  100% full, high\n"));
        assert!(!text.contains("in queue"));
        assert!(text.contains("6 PM   20% full, low"));
        Ok(())
    }

    #[test]
    fn events_text_groups_attendance() -> Result<()> {
        let text = render(Command::Events { json: false })?;
        assert!(text.starts_with("Open Day\n"));
        assert!(text.contains("Entire Campus · 5,000 expected"));
        assert!(text.contains("Bayliss Parking     75%  medium"));
        Ok(())
    }

    #[test]
    fn empty_source_prints_placeholder() -> Result<()> {
        let service = ParkingService::new(MockLotSource::with_lots(Vec::<ParkingLot>::new()));
        let mut out = Vec::new();
        run(Command::Lots { json: false }, &service, &mut out)?;
        assert_eq!(String::from_utf8(out)?, "No parking lots\n");
        Ok(())
    }

    #[test]
    fn interactive_commands_are_rejected() {
        let service = ParkingService::new(MockLotSource::default());
        let result = run(Command::Tui { theme: None }, &service, &mut Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(800), "800");
        assert_eq!(format_thousands(5000), "5,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }
}
