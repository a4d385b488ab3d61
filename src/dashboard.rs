use std::io::{ErrorKind, IsTerminal, Write};
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::command::{Command, HELP};
use crate::error::DashboardError;
use crate::fetch::FlightApi;
use crate::filter::FilterInput;
use crate::model::{Flight, Stats};
use crate::notify::Notifications;
use crate::page::WorkingSet;
use crate::table;
use crate::view::{DetailView, DisplayModel};

pub const LOAD_FAILED: &str = "Failed to load flight data. Please try again.";
pub const FILTERS_APPLIED: &str = "Filters applied successfully!";
pub const FILTERS_CLEARED: &str = "Filters cleared!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    ErrorShown,
}

/// Shows that a request is in flight.
pub trait LoadIndicator: Send {
    fn set_loading(&mut self, loading: bool);
}

#[derive(Debug, Default)]
pub struct NoIndicator;

impl LoadIndicator for NoIndicator {
    fn set_loading(&mut self, _loading: bool) {}
}

/// Writes a status line to stderr while loading.
#[derive(Debug, Default)]
pub struct StderrIndicator;

impl LoadIndicator for StderrIndicator {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            eprint!("Loading flight data...\r");
        } else {
            eprint!("                      \r");
        }
        let _ = std::io::stderr().flush();
    }
}

/// Application state: the only writer of the working set.
pub struct Dashboard<A> {
    api: A,
    stats: Option<Stats>,
    flights: WorkingSet,
    filters: FilterInput,
    notifications: Notifications,
    detail: Option<Flight>,
    phase: LoadPhase,
    indicator: Box<dyn LoadIndicator>,
}

impl<A: FlightApi> Dashboard<A> {
    pub fn new(api: A, flights: WorkingSet, filters: FilterInput) -> Self {
        Self {
            api,
            stats: None,
            flights,
            filters,
            notifications: Notifications::default(),
            detail: None,
            phase: LoadPhase::Idle,
            indicator: Box::new(NoIndicator),
        }
    }

    pub fn with_indicator(mut self, indicator: impl LoadIndicator + 'static) -> Self {
        self.indicator = Box::new(indicator);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn flights(&self) -> &WorkingSet {
        &self.flights
    }

    pub fn filters(&self) -> &FilterInput {
        &self.filters
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Fetches and, only if both requests succeed, replaces stats and flights
    /// and returns to page 1.
    pub async fn try_load(&mut self) -> Result<(), DashboardError> {
        let criteria = self.filters.parse()?;
        let (stats, flights) = crate::snapshot(&self.api, &criteria).await?;
        info!(
            flights = flights.len(),
            filtered = !criteria.is_empty(),
            "flight data loaded"
        );
        self.stats = Some(stats);
        self.flights.replace(flights);
        Ok(())
    }

    /// The reload path shared by the timer and every user action. Failures
    /// leave the previous data in place and raise one error notification.
    pub async fn load_data(&mut self) -> LoadOutcome {
        self.phase = LoadPhase::Loading;
        self.indicator.set_loading(true);

        let outcome = match self.try_load().await {
            Ok(()) => LoadOutcome::Rendered,
            Err(e) => {
                error!(error = %e, "error loading data");
                let message = match e {
                    DashboardError::Validation(msg) => msg,
                    _ => LOAD_FAILED.to_string(),
                };
                self.notifications.error(message);
                LoadOutcome::ErrorShown
            }
        };

        self.indicator.set_loading(false);
        self.phase = LoadPhase::Idle;
        outcome
    }

    /// Applies `key=value` changes on top of the current inputs. Invalid input
    /// is reported and leaves the active filters untouched.
    pub async fn apply_filters(&mut self, changes: &[(String, String)]) -> Option<LoadOutcome> {
        let mut candidate = self.filters.clone();
        let checked = changes
            .iter()
            .try_for_each(|(key, value)| candidate.set(key, value))
            .and_then(|()| candidate.parse().map(|_| ()));

        if let Err(e) = checked {
            warn!(error = %e, "rejected filter input");
            self.notifications.error(e.to_string());
            return None;
        }

        self.filters = candidate;
        self.notifications.success(FILTERS_APPLIED);
        Some(self.load_data().await)
    }

    pub async fn clear_filters(&mut self) -> LoadOutcome {
        self.filters.clear();
        self.notifications.success(FILTERS_CLEARED);
        self.load_data().await
    }

    pub fn next_page(&mut self) -> bool {
        self.flights.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.flights.prev_page()
    }

    pub fn set_flights_per_page(&mut self, n: usize) -> Result<(), DashboardError> {
        self.flights.set_flights_per_page(n)
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<(), DashboardError> {
        self.flights.go_to(page)
    }

    /// Opens the detail view for a 1-based row of the current page.
    pub fn show(&mut self, row: usize) -> Result<&Flight, DashboardError> {
        let page = self.flights.page_slice();
        let flight = row
            .checked_sub(1)
            .and_then(|i| page.get(i))
            .ok_or_else(|| {
                DashboardError::Validation(format!(
                    "no row {row} on this page (1-{})",
                    page.len()
                ))
            })?;
        Ok(self.detail.insert(flight.clone()))
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<DetailView> {
        self.detail.as_ref().map(DetailView::new)
    }

    pub fn model(&self) -> DisplayModel {
        DisplayModel::build(self.stats.as_ref(), &self.flights)
    }

    pub async fn handle(&mut self, command: Command) {
        debug!(?command, "command");
        match command {
            Command::Refresh => {
                self.load_data().await;
            }
            Command::NextPage => {
                self.next_page();
            }
            Command::PrevPage => {
                self.prev_page();
            }
            Command::PerPage(n) => {
                if let Err(e) = self.set_flights_per_page(n) {
                    self.notifications.error(e.to_string());
                }
            }
            Command::Filter(changes) => {
                self.apply_filters(&changes).await;
            }
            Command::ClearFilters => {
                self.clear_filters().await;
            }
            Command::Show(row) => {
                if let Err(e) = self.show(row) {
                    self.notifications.error(e.to_string());
                }
            }
            Command::Close | Command::Dismiss => self.close_detail(),
            Command::Help | Command::Quit => {}
        }
    }
}

fn describe_filters(filters: &FilterInput) -> String {
    match filters.parse() {
        Ok(criteria) if !criteria.is_empty() => criteria
            .to_url_params()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" "),
        _ => "none".to_string(),
    }
}

fn draw<A: FlightApi>(dashboard: &mut Dashboard<A>, title: &str, show_help: bool) {
    let mut out = String::new();
    if std::io::stdout().is_terminal() {
        out.push_str("\x1b[2J\x1b[H");
    }

    out.push_str(&format!(
        "{title} — filters: {}\n",
        describe_filters(dashboard.filters())
    ));

    let notes = table::render_notifications(dashboard.notifications_mut(), Instant::now());
    if !notes.is_empty() {
        out.push_str(&notes);
        out.push('\n');
    }

    out.push_str(&table::render(&dashboard.model()));
    out.push('\n');

    if let Some(detail) = dashboard.detail() {
        out.push_str(&table::render_detail(&detail));
        out.push('\n');
    }

    if show_help {
        out.push_str(HELP);
        out.push('\n');
    }

    out.push_str("> ");
    print!("{out}");
    let _ = std::io::stdout().flush();
}

/// Runs the live dashboard on stdin until `quit` is typed.
pub async fn watch<A: FlightApi>(
    dashboard: &mut Dashboard<A>,
    interval: Duration,
    title: &str,
) -> Result<(), DashboardError> {
    watch_input(dashboard, interval, title, BufReader::new(tokio::io::stdin())).await
}

/// Runs the live dashboard, reading commands from `input`. Reloads every
/// `interval`; once `input` ends or fails only the timer drives updates.
pub async fn watch_input<A, R>(
    dashboard: &mut Dashboard<A>,
    interval: Duration,
    title: &str,
    input: R,
) -> Result<(), DashboardError>
where
    A: FlightApi,
    R: AsyncBufRead + Unpin,
{
    let mut refresh = tokio::time::interval(interval);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut expiry = tokio::time::interval(Duration::from_secs(1));
    expiry.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = input.lines();
    let mut input_open = true;

    info!(interval_secs = interval.as_secs(), "watching");

    loop {
        let mut show_help = false;

        tokio::select! {
            _ = refresh.tick() => {
                dashboard.load_data().await;
            }
            _ = expiry.tick() => {
                let before = dashboard.notifications().len();
                dashboard.notifications_mut().active(Instant::now()).count();
                if dashboard.notifications().len() == before {
                    continue;
                }
            }
            line = lines.next_line(), if input_open => {
                match line {
                    Ok(Some(line)) => match Command::parse(&line) {
                        Ok(Command::Quit) => break,
                        Ok(Command::Help) => show_help = true,
                        Ok(command) => dashboard.handle(command).await,
                        Err(e) => dashboard.notifications_mut().error(e.to_string()),
                    },
                    Ok(None) => {
                        debug!("input closed");
                        input_open = false;
                    }
                    // The undecodable line has been consumed.
                    Err(e) if e.kind() == ErrorKind::InvalidData => {
                        warn!(error = %e, "unreadable command line");
                        dashboard
                            .notifications_mut()
                            .error("Input is not valid UTF-8; command ignored.");
                    }
                    Err(e) => {
                        error!(error = %e, "command input failed");
                        dashboard
                            .notifications_mut()
                            .error(format!("Command input stopped: {e}"));
                        input_open = false;
                    }
                }
            }
        }

        draw(dashboard, title, show_help);
    }

    Ok(())
}
