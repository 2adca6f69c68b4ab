//! Parsing of the upstream CSV body into a [`Quote`].
//!
//! Upstream answers with a comma-separated header line followed by a single data
//! line, e.g.
//!
//! ```text
//! Symbol,Date,Time,Open,High,Low,Close,Volume
//! AAPL.US,2024-01-02,22:00:19,187.15,188.44,183.885,185.64,82488674
//! ```
//!
//! Only the first two lines are read. Columns are located by exact, case-sensitive
//! header name, so extra or reordered columns are fine. Checks run in a fixed order
//! and the first failing one decides the [`ParseError`].

use log::debug;

use crate::error::ParseError;
use crate::quote::Quote;

/// Field delimiter used by upstream.
pub const DELIMITER: char = ',';
/// Upstream marker for unavailable data.
pub const NOT_AVAILABLE: &str = "N/A";

const SYMBOL_COLUMN: &str = "Symbol";
const DATE_COLUMN: &str = "Date";
const TIME_COLUMN: &str = "Time";
const CLOSE_COLUMN: &str = "Close";
const REQUIRED_COLUMNS: [&str; 4] = [SYMBOL_COLUMN, DATE_COLUMN, TIME_COLUMN, CLOSE_COLUMN];

/// Parse `body` into a quote. `requested` is the symbol the caller asked for and is
/// only used for diagnostics; the returned symbol is the one upstream reported.
pub fn parse_quote(body: &str, requested: &str) -> Result<Quote, ParseError> {
    let text = body.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let mut lines = text.lines();
    let (Some(header), Some(row)) = (lines.next(), lines.next()) else {
        return Err(ParseError::MalformedStructure);
    };

    let columns: Vec<&str> = header.split(DELIMITER).map(str::trim).collect();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = columns
            .iter()
            .position(|column| *column == name)
            .ok_or(ParseError::MissingColumn(name))?;
    }
    let [symbol_idx, date_idx, time_idx, close_idx] = indices;

    let values: Vec<&str> = row.split(DELIMITER).map(str::trim).collect();
    let field = |idx: usize| values.get(idx).copied().unwrap_or("");

    let symbol = field(symbol_idx);
    if symbol.is_empty() || symbol == NOT_AVAILABLE {
        return Err(ParseError::InvalidSymbol);
    }

    let date = field(date_idx);
    let time = field(time_idx);
    if date.is_empty() || time.is_empty() {
        return Err(ParseError::MissingTimestamp);
    }

    let raw_close = field(close_idx);
    if raw_close.is_empty() || raw_close == NOT_AVAILABLE {
        return Err(ParseError::MissingPrice);
    }
    let close = parse_leading_float(raw_close);
    if close.is_nan() {
        return Err(ParseError::InvalidPrice(raw_close.to_string()));
    }

    if !symbol.eq_ignore_ascii_case(requested.trim()) {
        debug!("Requested {} but upstream answered for {}", requested.trim(), symbol);
    }

    Ok(Quote {
        symbol: symbol.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        close,
    })
}

/// Parse the longest numeric prefix of `text`, ignoring anything after it.
///
/// Accepts an optional sign, integer digits, an optional fraction, an optional
/// exponent (consumed only when at least one exponent digit follows) and the
/// `Infinity` literal. Returns NaN when `text` does not start with a number.
pub fn parse_leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = count_digits(&bytes[exp_start.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
