use std::time::Instant;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

use crate::notify::Notifications;
use crate::page::PageInfo;
use crate::view::{AircraftCard, DetailView, DisplayModel, Row, StatsCards};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_stats(stats: &StatsCards) -> String {
    let mut table = new_table();
    table.set_header(vec!["Total Flights", "Flights Today", "Avg Altitude", "Avg Speed"]);
    table.add_row(vec![
        &stats.total_flights,
        &stats.flights_today,
        &stats.average_altitude,
        &stats.average_speed,
    ]);
    table.to_string()
}

pub fn render_special(cards: &[AircraftCard]) -> String {
    let mut table = new_table();
    table.set_header(vec!["", "Aircraft", "Distance", "Altitude", "Speed"]);
    for card in cards {
        table.add_row(vec![
            card.category.title(),
            card.ident.as_str(),
            card.distance.as_str(),
            card.altitude.as_str(),
            card.speed.as_str(),
        ]);
    }
    table.to_string()
}

pub fn render_rows(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "No flights match the current filters\nTry adjusting your filter criteria".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["#", "Callsign", "Altitude", "Speed", "Distance", "Time"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.index).set_alignment(CellAlignment::Right),
            Cell::new(&row.callsign),
            Cell::new(&row.altitude).set_alignment(CellAlignment::Right),
            Cell::new(&row.speed).set_alignment(CellAlignment::Right),
            Cell::new(&row.distance).set_alignment(CellAlignment::Right),
            Cell::new(&row.time),
        ]);
    }
    table.to_string()
}

/// `« prev | Page 2 of 3 (45 flights) | next »`, with disabled arrows blanked.
pub fn render_pagination(info: &PageInfo) -> String {
    let prev = if info.prev_disabled { "      " } else { "« prev" };
    let next = if info.next_disabled { "      " } else { "next »" };
    format!("{prev} | {} | {next}", info.label)
}

pub fn render_detail(detail: &DetailView) -> String {
    let mut table = new_table();
    table.set_header(vec!["Flight Details", ""]);
    for (label, value) in &detail.fields {
        table.add_row(vec![*label, value.as_str()]);
    }
    table.to_string()
}

pub fn render_notifications(notifications: &mut Notifications, now: Instant) -> String {
    notifications
        .active(now)
        .map(|n| format!("{} {}", n.severity.icon(), n.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(model: &DisplayModel) -> String {
    let mut sections = Vec::new();
    if let Some(ref stats) = model.stats {
        sections.push(render_stats(stats));
    }
    sections.push(render_special(&model.special));
    sections.push(render_rows(&model.rows));
    sections.push(render_pagination(&model.pagination));
    sections.join("\n")
}
