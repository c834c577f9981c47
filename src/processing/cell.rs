//! Raw cell semantics: blankness, truthiness, stringification and numeric coercion.
//!
//! Readers hand out [`calamine::Data`] untouched; every interpretation of a cell value lives here
//! so that both workbook formats behave identically.

use calamine::Data;

/// A cell with no value: empty, or an empty string.
pub fn is_blank(c: &Data) -> bool {
    match c {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Whether a raw value counts as "set" for inclusion and optional-field decisions.
///
/// Blank cells, numeric zero and `false` are falsy; everything else, including whitespace-only
/// strings and error cells, is truthy.
pub fn is_truthy(c: &Data) -> bool {
    match c {
        Data::Empty => false,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => !s.is_empty(),
        Data::Int(i) => *i != 0,
        Data::Float(f) => *f != 0.0,
        Data::Bool(b) => *b,
        Data::DateTime(_) | Data::Error(_) => true,
    }
}

/// Render a raw value as text.
///
/// Strings are kept verbatim, integral numbers lose their fractional part (`500000.0` renders as
/// `500000`) and date cells render as `YYYY-MM-DD HH:MM:SS`.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) if !dt.is_duration() => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            _ => dt.as_f64().to_string(),
        },
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

/// Coerce a raw value to a number.
///
/// Numbers pass through, booleans become `1.0`/`0.0`, strings are parsed after trimming. Dates,
/// durations and error cells are rejected.
pub fn coerce_f64(c: &Data) -> Result<f64, String> {
    match c {
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => s.trim().parse::<f64>().map_err(|e| e.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => Err("expected number (got date)".to_string()),
        Data::DurationIso(_) => Err("expected number (got duration)".to_string()),
        Data::Error(_) => Err("expected number (got error cell)".to_string()),
        Data::Empty => Err("expected number (got empty cell)".to_string()),
    }
}
