use crate::models::FareRecord;

/// Pick the first record departing from `departure_code`, in feed order
pub fn first_matching<'a>(
    records: &'a [FareRecord],
    departure_code: &str,
) -> Option<&'a FareRecord> {
    records
        .iter()
        .find(|record| record.departure() == Some(departure_code))
}
