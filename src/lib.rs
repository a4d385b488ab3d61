pub mod aggregate;
pub mod command;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod model;
pub mod notify;
pub mod page;
pub mod table;
pub mod view;

use error::DashboardError;
use fetch::FlightApi;
use filter::FilterCriteria;
use model::{Flight, Stats};

/// Fetches stats and the matching flights concurrently. Fails as a whole if
/// either request fails.
pub async fn snapshot<A: FlightApi + ?Sized>(
    api: &A,
    filters: &FilterCriteria,
) -> Result<(Stats, Vec<Flight>), DashboardError> {
    tokio::try_join!(api.fetch_stats(), api.fetch_flights(filters))
}
