use serde::Serialize;

use crate::error::DashboardError;
use crate::model::Flight;

pub const DEFAULT_FLIGHTS_PER_PAGE: usize = 20;

/// Pagination controls derived from the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_flights: usize,
    pub label: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// The flights from the most recent successful load and the page being viewed.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    flights: Vec<Flight>,
    current_page: usize,
    flights_per_page: usize,
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self {
            flights: Vec::new(),
            current_page: 1,
            flights_per_page: DEFAULT_FLIGHTS_PER_PAGE,
        }
    }
}

impl WorkingSet {
    pub fn new(flights_per_page: usize) -> Result<Self, DashboardError> {
        let mut set = Self::default();
        set.set_flights_per_page(flights_per_page)?;
        Ok(set)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn flights_per_page(&self) -> usize {
        self.flights_per_page
    }

    /// Replaces every record and returns to the first page.
    pub fn replace(&mut self, flights: Vec<Flight>) {
        self.flights = flights;
        self.current_page = 1;
    }

    pub fn set_flights_per_page(&mut self, n: usize) -> Result<(), DashboardError> {
        if n == 0 {
            return Err(DashboardError::Validation(
                "flights per page must be at least 1".into(),
            ));
        }
        self.flights_per_page = n;
        self.current_page = 1;
        Ok(())
    }

    pub fn total_pages(&self) -> usize {
        self.flights.len().div_ceil(self.flights_per_page)
    }

    /// Moves to `page` if it exists. Page 1 always exists, even when empty.
    pub fn go_to(&mut self, page: usize) -> Result<(), DashboardError> {
        let last = self.total_pages().max(1);
        if page == 0 || page > last {
            return Err(DashboardError::Validation(format!(
                "page {page} is out of range (1-{last})"
            )));
        }
        self.current_page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn page_slice(&self) -> &[Flight] {
        let start = (self.current_page - 1) * self.flights_per_page;
        let start = start.min(self.flights.len());
        let end = (start + self.flights_per_page).min(self.flights.len());
        &self.flights[start..end]
    }

    pub fn pagination(&self) -> PageInfo {
        let total_pages = self.total_pages();
        let total_flights = self.flights.len();
        PageInfo {
            current_page: self.current_page,
            total_pages,
            total_flights,
            label: format!(
                "Page {} of {total_pages} ({total_flights} flights)",
                self.current_page
            ),
            prev_disabled: self.current_page == 1,
            next_disabled: self.current_page == total_pages || total_pages == 0,
        }
    }
}
