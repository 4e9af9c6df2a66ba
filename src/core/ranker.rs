use crate::domain::model::Destination;
use std::cmp::Ordering;

/// Orders destinations by ascending flight price. Unpriced destinations go
/// last; ties keep their input order.
pub fn rank_by_price(mut destinations: Vec<Destination>) -> Vec<Destination> {
    destinations.sort_by(|a, b| compare_price(a.price(), b.price()));
    destinations
}

fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
