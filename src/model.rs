use serde::{Deserialize, Deserializer, Serialize};

/// One tracked position report as returned by the flight API.
///
/// Numeric fields are nullable on the wire; a missing value is a valid state
/// and is never treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flight {
    pub id: Option<i64>,
    pub callsign: Option<String>,
    pub icao24: Option<String>,
    pub aircraft_type: Option<String>,
    pub origin_airport: Option<String>,
    pub destination_airport: Option<String>,
    pub altitude_ft: Option<f64>,
    pub speed_kts: Option<f64>,
    pub distance_to_target: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "flag")]
    pub is_departing_fra: Option<bool>,
    #[serde(deserialize_with = "flag")]
    pub closest_point: Option<bool>,
    pub record_type: Option<String>,
}

impl Flight {
    /// Callsign, with an empty string counted as absent.
    pub fn callsign(&self) -> Option<&str> {
        non_empty(self.callsign.as_deref())
    }

    /// Label used on summary cards: callsign, then transponder address.
    pub fn ident(&self) -> &str {
        self.callsign()
            .or_else(|| non_empty(self.icao24.as_deref()))
            .unwrap_or("Unknown")
    }
}

// SQLite booleans arrive as 0/1.
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|f| match f {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    }))
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_flights: u64,
    pub flights_today: u64,
    pub average_altitude_ft: f64,
    pub average_speed_kts: f64,
}
