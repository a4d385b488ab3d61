//! Host-neutral snapshot of everything the dashboard shows.
//!
//! Nothing here knows about terminals; [`crate::table`] turns a
//! [`DisplayModel`] into text.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::aggregate::special_aircraft;
use crate::model::{non_empty, Flight, Stats};
use crate::page::{PageInfo, WorkingSet};

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN: &str = "Unknown";
const NO_DATA: &str = "No data";
const BLANK: &str = "-";

/// Formats a possibly missing number. Zero digits rounds to an integer,
/// halves toward positive infinity; fixed decimals round exact halves away
/// from zero.
pub fn format_number(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if digits > 0 {
                to_fixed(v, digits)
            } else {
                format_rounded(v)
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

// `{:.N}` rounds exact binary ties to even. A tie has at most `digits + 1`
// fractional digits, so twenty more zeros after the 5 identify it.
fn to_fixed(v: f64, digits: usize) -> String {
    const TAIL: usize = 20;
    let wide = format!("{:.*}", digits + 1 + TAIL, v.abs());
    let (head, tail) = wide.split_at(wide.len() - TAIL);
    let tie = head.ends_with('5') && tail.bytes().all(|b| b == b'0');
    if tie {
        let nudge = 0.25 * 10f64.powi(-(digits as i32));
        format!("{:.*}", digits, v + nudge.copysign(v))
    } else {
        format!("{:.*}", digits, v)
    }
}

fn round_half_up(v: f64) -> f64 {
    let r = v.round();
    // `round` sends negative halves away from zero.
    if v < 0.0 && r - v == -0.5 {
        r + 1.0
    } else {
        r
    }
}

fn format_rounded(v: f64) -> String {
    // `+ 0.0` drops the sign of -0.
    format!("{:.0}", round_half_up(v) + 0.0)
}

/// Groups digits in threes: `12345` → `12,345`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Accepts RFC 3339 or a naive `YYYY-MM-DD HH:MM:SS[.f]` (with `T` or space),
/// the latter read as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn format_timestamp(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| format_datetime(&dt))
        .unwrap_or_else(|| "Invalid Date".to_string())
}

fn with_unit(value: Option<f64>, digits: usize, unit: &str) -> String {
    format!("{} {unit}", format_number(value, digits))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsCards {
    pub total_flights: String,
    pub flights_today: String,
    pub average_altitude: String,
    pub average_speed: String,
}

impl StatsCards {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            total_flights: format_count(stats.total_flights),
            flights_today: format_count(stats.flights_today),
            average_altitude: format!("{} ft", format_rounded(stats.average_altitude_ft)),
            average_speed: format!("{} kts", format_rounded(stats.average_speed_kts)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Closest,
    Lowest,
    Fastest,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Self::Closest => "Closest",
            Self::Lowest => "Lowest",
            Self::Fastest => "Fastest",
        }
    }

    fn has_value(self, flight: &Flight) -> bool {
        match self {
            Self::Closest => flight.distance_to_target.is_some(),
            Self::Lowest => flight.altitude_ft.is_some(),
            Self::Fastest => flight.speed_kts.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AircraftCard {
    pub category: Category,
    pub ident: String,
    pub distance: String,
    pub altitude: String,
    pub speed: String,
}

impl AircraftCard {
    /// A winner without the category's own field renders as "No data".
    pub fn new(category: Category, winner: Option<&Flight>) -> Self {
        match winner.filter(|f| category.has_value(f)) {
            Some(f) => Self {
                category,
                ident: f.ident().to_string(),
                distance: with_unit(f.distance_to_target, 2, "km"),
                altitude: with_unit(f.altitude_ft, 0, "ft"),
                speed: with_unit(f.speed_kts, 0, "kts"),
            },
            None => Self {
                category,
                ident: NO_DATA.to_string(),
                distance: BLANK.to_string(),
                altitude: BLANK.to_string(),
                speed: BLANK.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 1-based position on the current page; the handle for opening details.
    pub index: usize,
    pub callsign: String,
    pub altitude: String,
    pub speed: String,
    pub distance: String,
    pub time: String,
}

impl Row {
    pub fn new(index: usize, flight: &Flight) -> Self {
        Self {
            index,
            callsign: flight.callsign().unwrap_or(UNKNOWN).to_string(),
            altitude: with_unit(flight.altitude_ft, 0, "ft"),
            speed: with_unit(flight.speed_kts, 0, "kts"),
            distance: with_unit(flight.distance_to_target, 2, "km"),
            time: format_timestamp(flight.timestamp.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub stats: Option<StatsCards>,
    pub special: Vec<AircraftCard>,
    pub rows: Vec<Row>,
    pub pagination: PageInfo,
}

impl DisplayModel {
    /// Rows come from the current page; the summary cards from every flight.
    pub fn build(stats: Option<&Stats>, set: &WorkingSet) -> Self {
        let special = special_aircraft(set.flights());
        Self {
            stats: stats.map(StatsCards::from_stats),
            special: vec![
                AircraftCard::new(Category::Closest, special.closest),
                AircraftCard::new(Category::Lowest, special.lowest),
                AircraftCard::new(Category::Fastest, special.fastest),
            ],
            rows: set
                .page_slice()
                .iter()
                .enumerate()
                .map(|(i, f)| Row::new(i + 1, f))
                .collect(),
            pagination: set.pagination(),
        }
    }
}

/// Every attribute of one flight, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub fields: Vec<(&'static str, String)>,
}

impl DetailView {
    pub fn new(flight: &Flight) -> Self {
        let text = |v: &Option<String>| non_empty(v.as_deref()).unwrap_or(UNKNOWN).to_string();
        Self {
            fields: vec![
                ("Flight Number", text(&flight.callsign)),
                ("ICAO24", text(&flight.icao24)),
                ("Aircraft Type", text(&flight.aircraft_type)),
                ("Altitude", with_unit(flight.altitude_ft, 0, "ft")),
                ("Speed", with_unit(flight.speed_kts, 0, "kts")),
                ("Distance to Target", with_unit(flight.distance_to_target, 2, "km")),
                ("Origin", text(&flight.origin_airport)),
                ("Destination", text(&flight.destination_airport)),
                ("Time", format_timestamp(flight.timestamp.as_deref())),
            ],
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}
