//! Field-level validation rules shared by create and update.

use chrono::NaiveDate;

use crate::{Error, Result};

/// Inclusive bounds on message length, counted in characters.
pub const MESSAGE_MIN_CHARS: usize = 1;
pub const MESSAGE_MAX_CHARS: usize = 500;

/// The only accepted wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn message(message: &str) -> Result<()> {
  let len = message.chars().count();
  if (MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&len) {
    Ok(())
  } else {
    Err(Error::invalid(format!(
      "Message must be between {MESSAGE_MIN_CHARS} and {MESSAGE_MAX_CHARS} characters"
    )))
  }
}

/// Parse a `YYYY-MM-DD` date.
///
/// The year must be exactly four unsigned digits: `%Y` alone would also take
/// `+10000` or `-0001`, which break the text ordering stores rely on.
pub fn date(raw: &str) -> Result<NaiveDate> {
  let invalid = || Error::invalid("Invalid date format. Use YYYY-MM-DD");
  if !has_plain_year(raw) {
    return Err(invalid());
  }
  NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

fn has_plain_year(raw: &str) -> bool {
  let bytes = raw.as_bytes();
  bytes.len() > 5
    && bytes[..4].iter().all(u8::is_ascii_digit)
    && bytes[4] == b'-'
    && bytes[5..].iter().all(|b| b.is_ascii_digit() || *b == b'-')
}

/// Parse an optional start date, where an empty string means "no start date".
pub fn start_date(raw: &str) -> Result<Option<NaiveDate>> {
  if raw.is_empty() { Ok(None) } else { date(raw).map(Some) }
}

pub fn date_order(start: Option<NaiveDate>, expiration: NaiveDate) -> Result<()> {
  match start {
    Some(start) if start > expiration => {
      Err(Error::invalid("Start date must be before expiration date"))
    }
    _ => Ok(()),
  }
}
