use crate::model::Flight;

/// The extremal records shown on the summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpecialAircraft<'a> {
    pub closest: Option<&'a Flight>,
    pub lowest: Option<&'a Flight>,
    pub fastest: Option<&'a Flight>,
}

/// Finds the closest, lowest and fastest aircraft in one pass.
///
/// The first record seeds every category even when it lacks the field, so a
/// non-empty list always yields three winners. Callers must check that the
/// winner actually carries the field before displaying it. Comparisons are
/// strict, so the earliest of equal values wins.
pub fn special_aircraft(flights: &[Flight]) -> SpecialAircraft<'_> {
    let Some(first) = flights.first() else {
        return SpecialAircraft::default();
    };

    let mut closest = first;
    let mut lowest = first;
    let mut fastest = first;

    for flight in flights {
        if beats(flight.distance_to_target, closest.distance_to_target, |a, b| a < b) {
            closest = flight;
        }
        if beats(flight.altitude_ft, lowest.altitude_ft, |a, b| a < b) {
            lowest = flight;
        }
        if beats(flight.speed_kts, fastest.speed_kts, |a, b| a > b) {
            fastest = flight;
        }
    }

    SpecialAircraft {
        closest: Some(closest),
        lowest: Some(lowest),
        fastest: Some(fastest),
    }
}

fn beats(candidate: Option<f64>, best: Option<f64>, better: fn(f64, f64) -> bool) -> bool {
    match (candidate, best) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(c), Some(b)) => better(c, b),
    }
}
