use crate::error::DashboardError;

/// One line typed into the live dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    NextPage,
    PrevPage,
    PerPage(usize),
    /// `key=value` pairs; a bare `key=` empties that input.
    Filter(Vec<(String, String)>),
    ClearFilters,
    Show(usize),
    Close,
    /// A blank line: dismisses the detail view like a click outside it.
    Dismiss,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  r, refresh              reload now
  n, next / p, prev       change page
  per <N>                 flights per page
  f, filter k=v [k=v ..]  apply filters (altitude_min, altitude_max, distance_min,
                          distance_max, speed_min, speed_max, tracking_number)
  c, clear                clear all filters
  show <ROW>              details for a row on this page
  close (or empty line)   close the details
  h, help                 this help
  q, quit                 exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, DashboardError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Dismiss);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "r" | "refresh" => Ok(Self::Refresh),
            "n" | "next" => Ok(Self::NextPage),
            "p" | "prev" => Ok(Self::PrevPage),
            "per" => {
                let n = rest.parse::<usize>().map_err(|_| {
                    DashboardError::Validation(format!("per expects a number, got \"{rest}\""))
                })?;
                Ok(Self::PerPage(n))
            }
            "f" | "filter" => {
                let mut pairs = Vec::new();
                for token in rest.split_whitespace() {
                    let (key, value) = token.split_once('=').ok_or_else(|| {
                        DashboardError::Validation(format!(
                            "filter expects key=value, got \"{token}\""
                        ))
                    })?;
                    pairs.push((key.to_string(), value.to_string()));
                }
                Ok(Self::Filter(pairs))
            }
            "c" | "clear" => Ok(Self::ClearFilters),
            "show" => {
                let row = rest.parse::<usize>().map_err(|_| {
                    DashboardError::Validation(format!("show expects a row number, got \"{rest}\""))
                })?;
                Ok(Self::Show(row))
            }
            "close" => Ok(Self::Close),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(DashboardError::Validation(format!(
                "unknown command \"{other}\" — type help"
            ))),
        }
    }
}
