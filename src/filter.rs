use crate::error::DashboardError;

/// Raw text of the filter inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub altitude_min: String,
    pub altitude_max: String,
    pub distance_min: String,
    pub distance_max: String,
    pub speed_min: String,
    pub speed_max: String,
    pub tracking_number: String,
}

/// Field names accepted by [`FilterInput::set`], in query order.
pub const FILTER_KEYS: [&str; 7] = [
    "altitude_min",
    "altitude_max",
    "distance_min",
    "distance_max",
    "speed_min",
    "speed_max",
    "tracking_number",
];

impl FilterInput {
    /// Sets one input by its query-parameter name. Dashes are accepted in
    /// place of underscores.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        let slot = match key.replace('-', "_").as_str() {
            "altitude_min" => &mut self.altitude_min,
            "altitude_max" => &mut self.altitude_max,
            "distance_min" => &mut self.distance_min,
            "distance_max" => &mut self.distance_max,
            "speed_min" => &mut self.speed_min,
            "speed_max" => &mut self.speed_max,
            "tracking_number" => &mut self.tracking_number,
            _ => {
                return Err(DashboardError::Validation(format!(
                    "unknown filter \"{key}\" — expected one of {}",
                    FILTER_KEYS.join(", ")
                )))
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn parse(&self) -> Result<FilterCriteria, DashboardError> {
        Ok(FilterCriteria {
            altitude_min: parse_number("altitude_min", &self.altitude_min)?,
            altitude_max: parse_number("altitude_max", &self.altitude_max)?,
            distance_min: parse_number("distance_min", &self.distance_min)?,
            distance_max: parse_number("distance_max", &self.distance_max)?,
            speed_min: parse_number("speed_min", &self.speed_min)?,
            speed_max: parse_number("speed_max", &self.speed_max)?,
            tracking_number: parse_text(&self.tracking_number),
        })
    }
}

fn parse_number(field: &str, raw: &str) -> Result<Option<f64>, DashboardError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(DashboardError::Validation(format!(
            "invalid number \"{raw}\" for {field}"
        ))),
    }
}

fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Active constraints; `None` means the dimension is unconstrained.
///
/// Bounds are not cross-checked: a minimum above its maximum is sent as-is
/// and left to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub altitude_min: Option<f64>,
    pub altitude_max: Option<f64>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub speed_min: Option<f64>,
    pub speed_max: Option<f64>,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    All,
    Filtered,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::All => "/flights",
            Self::Filtered => "/flights/filtered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightsRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.to_url_params().is_empty()
    }

    pub fn to_url_params(&self) -> Vec<(String, String)> {
        let numbers = [
            ("altitude_min", self.altitude_min),
            ("altitude_max", self.altitude_max),
            ("distance_min", self.distance_min),
            ("distance_max", self.distance_max),
            ("speed_min", self.speed_min),
            ("speed_max", self.speed_max),
        ];

        let mut params: Vec<(String, String)> = numbers
            .iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v.to_string())))
            .collect();

        if let Some(ref tracking) = self.tracking_number {
            params.push(("tracking_number".to_string(), tracking.clone()));
        }

        params
    }

    pub fn request(&self) -> FlightsRequest {
        let params = self.to_url_params();
        let endpoint = if params.is_empty() {
            Endpoint::All
        } else {
            Endpoint::Filtered
        };
        FlightsRequest { endpoint, params }
    }
}
