//! Product issuance time
//!
//! Below the AWIPS identifier, most products carry a
//! human-readable issuance line:
//!
//! ```txt
//! 1000 AM EDT Tue Apr 8 2011
//! 1945 UTC Mon Jun 10 2024
//! ```
//!
//! The first form is in local time and requires a
//! [time zone lookup](crate::TimeZoneLookup). The second is
//! already in UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use thiserror::Error;

use crate::timezone::TimeZoneLookup;

/// Error resolving the issuance line
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IssuedError {
    /// The issuance line uses a time zone which is not in the table
    #[error("missing timezone {0}")]
    UnknownTimeZone(String),

    /// The issuance line has the right shape but is not a valid date
    #[error("could not parse issued date line \"{0}\"")]
    Unparsable(String),
}

/// Find and resolve the issuance time of a product
///
/// Scans `text` for the first line fragment shaped like an
/// issuance line. If one is found, it is converted to UTC.
/// Local times are resolved against the `zones` table.
///
/// Returns `Ok(None)` if no issuance line is present at all. This
/// is not an error: the caller decides what time to use instead.
pub fn parse_issued<Z>(text: &str, zones: &Z) -> Result<Option<DateTime<Utc>>, IssuedError>
where
    Z: TimeZoneLookup + ?Sized,
{
    let Some(line) = text.lines().find_map(IssuedLine::find) else {
        return Ok(None);
    };

    let offset = match line.zone {
        Zone::Utc => FixedOffset::east_opt(0).ok_or(IssuedError::Unparsable(line.text()))?,
        Zone::Local { abbreviation, .. } => zones
            .lookup(abbreviation)
            .ok_or_else(|| IssuedError::UnknownTimeZone(abbreviation.to_owned()))?,
    };

    line.resolve(&offset).map(Some)
}

// An issuance line, tokenized but not yet validated
#[derive(Clone, Debug, PartialEq, Eq)]
struct IssuedLine<'t> {
    tokens: Vec<&'t str>,
    time: &'t str,
    zone: Zone<'t>,
    month: &'t str,
    day: &'t str,
    year: &'t str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone<'t> {
    Utc,
    Local { pm: bool, abbreviation: &'t str },
}

impl<'t> IssuedLine<'t> {
    // Find the first issuance-shaped run of tokens in `line`
    fn find(line: &'t str) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        (0..tokens.len()).find_map(|start| Self::at(&tokens[start..]))
    }

    // Match issuance tokens at the start of `tokens`
    //
    // <HHMM> UTC <Www> <Mon> <D> <YYYY>
    // <HMM> <AM|PM> <ZZZ> <Www> <Mon> <D> <YYYY>
    fn at(tokens: &[&'t str]) -> Option<Self> {
        let time = *tokens.first()?;
        if !is_digits(time, 3..=4) {
            return None;
        }

        let (zone, rest) = match *tokens.get(1)? {
            "UTC" => (Zone::Utc, &tokens[2..]),
            meridiem @ ("AM" | "PM") => {
                let abbreviation = *tokens.get(2)?;
                if !is_alpha(abbreviation, 3..=4) {
                    return None;
                }
                (
                    Zone::Local {
                        pm: meridiem == "PM",
                        abbreviation,
                    },
                    &tokens[3..],
                )
            }
            _ => return None,
        };

        match rest {
            &[weekday, month, day, year, ..]
                if is_alpha(weekday, 3..=3)
                    && is_alpha(month, 3..=3)
                    && is_digits(day, 1..=2)
                    && is_digits(year, 4..=4) =>
            {
                let len = 2 + if let Zone::Utc = zone { 4 } else { 5 };
                Some(Self {
                    tokens: tokens[..len].to_vec(),
                    time,
                    zone,
                    month,
                    day,
                    year,
                })
            }
            _ => None,
        }
    }

    // Convert to UTC, given the offset of the line's time zone
    fn resolve(&self, offset: &FixedOffset) -> Result<DateTime<Utc>, IssuedError> {
        let bad = || IssuedError::Unparsable(self.text());

        // the last two digits are always minutes
        let split = self.time.len() - 2;
        let mut hour: u32 = self.time[..split].parse().map_err(|_| bad())?;
        let minute: u32 = self.time[split..].parse().map_err(|_| bad())?;

        if let Zone::Local { pm, .. } = self.zone {
            if !(1..=12).contains(&hour) {
                return Err(bad());
            }
            hour = match (hour, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            };
        }

        let month = month_number(self.month).ok_or_else(bad)?;
        let day: u32 = self.day.parse().map_err(|_| bad())?;
        let year: i32 = self.year.parse().map_err(|_| bad())?;

        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .ok_or_else(bad)?;

        Ok(offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(bad)?
            .with_timezone(&Utc))
    }

    fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

fn month_number(month: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    let month = month.to_ascii_uppercase();
    MONTHS
        .iter()
        .position(|&m| m == month)
        .map(|idx| idx as u32 + 1)
}

fn is_digits(token: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_alpha(token: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&token.len()) && token.bytes().all(|b| b.is_ascii_alphabetic())
}
