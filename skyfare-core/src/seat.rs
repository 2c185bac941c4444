use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seat columns on the single supported narrow-body layout.
pub const SEAT_COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Rows in the default cabin layout.
pub const DEFAULT_SEAT_ROWS: u32 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Available,
    Booked,
}

/// Canonical per-seat state. The seat map is always a mapping from seat
/// label ("12C") to this struct; fare class is never stored here, it is
/// derived from the row on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub status: SeatStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger: Option<String>,
}

impl Seat {
    pub fn available() -> Self {
        Self {
            status: SeatStatus::Available,
            passenger: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }
}

/// Ordered so seat listings come out row-by-row deterministically.
pub type SeatMap = BTreeMap<String, Seat>;

/// Extract the row number from a seat label by keeping its digits.
///
/// Total: labels without digits yield 0, which downstream classification
/// treats as Economy. Strict validation happens in [`parse_label`].
pub fn seat_row(label: &str) -> i32 {
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatLabelError {
    #[error("Seat label must be a row number followed by a column letter: {0}")]
    Malformed(String),
    #[error("Seat row must be a positive integer: {0}")]
    InvalidRow(String),
    #[error("Seat column must be one of A-F: {0}")]
    InvalidColumn(String),
}

/// Strictly parse a seat label into (row, column).
///
/// Used when a seat is about to be booked or changed; display paths use
/// the total [`seat_row`] instead.
pub fn parse_label(label: &str) -> Result<(u32, char), SeatLabelError> {
    let label = label.trim();
    let split = label.find(|c: char| !c.is_ascii_digit());
    let (row_part, col_part) = match split {
        Some(idx) if idx > 0 => label.split_at(idx),
        _ => return Err(SeatLabelError::Malformed(label.to_string())),
    };

    let row: u32 = row_part
        .parse()
        .map_err(|_| SeatLabelError::InvalidRow(label.to_string()))?;
    if row == 0 {
        return Err(SeatLabelError::InvalidRow(label.to_string()));
    }

    let mut cols = col_part.chars();
    let col = cols.next().map(|c| c.to_ascii_uppercase());
    match (col, cols.next()) {
        (Some(c), None) if SEAT_COLUMNS.contains(&c) => Ok((row, c)),
        _ => Err(SeatLabelError::InvalidColumn(label.to_string())),
    }
}

/// Build the default all-available cabin layout: `rows` rows, columns A-F.
pub fn default_layout(rows: u32) -> SeatMap {
    let mut seats = SeatMap::new();
    for row in 1..=rows {
        for col in SEAT_COLUMNS {
            seats.insert(format!("{}{}", row, col), Seat::available());
        }
    }
    seats
}
