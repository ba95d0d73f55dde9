//! Display formatting for bill records.
//!
//! Output is fixed to the French short form the bills page has always shown
//! and never depends on the host locale.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::BillStatus;

/// First three letters of the French short month names, capitalized
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid bill date '{0}'")]
    InvalidDate(String),
}

/// Render an ISO date as `"<day> <Mon>. <yy>"`, e.g. `2004-04-04` as `4 Avr. 04`.
///
/// A time part after `T` is ignored.
pub fn format_date(iso_date: &str) -> Result<String, FormatError> {
    let date_part = iso_date.split('T').next().unwrap_or(iso_date).trim();
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| FormatError::InvalidDate(iso_date.to_string()))?;

    Ok(format!(
        "{} {}. {:02}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year().rem_euclid(100)
    ))
}

pub fn format_status(status: &BillStatus) -> String {
    match status {
        BillStatus::Pending => "En attente".to_string(),
        BillStatus::Accepted => "Accepté".to_string(),
        BillStatus::Refused => "Refusé".to_string(),
        BillStatus::Other(raw) => raw.clone(),
    }
}
