//! Universal Geographic Code (UGC)
//!
//! The UGC line lists the counties or zones which a segment
//! applies to, followed by the segment's expiration time:
//!
//! ```txt
//! WIZ046-047-051>053-ILC007-031200-
//! ```
//!
//! * A state and format prefix, `SSF`, where `F` is `C` for
//!   counties or `Z` for zones. The prefix carries over to
//!   following bare numbers until a new prefix appears.
//! * Three-digit numbers, or ranges `NNN>NNN`, or `ALL`
//! * The expiration as `DDHHMM`, relative to the issuance time
//!
//! Long UGC strings wrap onto several lines. Each line ends with
//! a hyphen. See NWS Directive 10-1702.

use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use thiserror::Error;

use crate::datetime::{self, InvalidDateErr};

/// Error decoding a UGC string
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UgcError {
    /// The UGC never reaches its `DDHHMM` expiration
    #[error("UGC \"{0}\" has no expiration time")]
    MissingExpiration(String),

    /// A code appeared before any `SSF` prefix
    #[error("UGC code \"{0}\" has no state and format prefix")]
    MissingPrefix(String),

    /// A token which is not a UGC code
    #[error("invalid UGC code \"{0}\"")]
    InvalidCode(String),

    /// A `NNN>NNN` range which runs backwards
    #[error("invalid UGC range \"{0}\"")]
    InvalidRange(String),

    /// Text follows the expiration time
    #[error("UGC has trailing codes after its expiration: \"{0}\"")]
    TrailingCodes(String),
}

/// UGC format: county or zone
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UgcKind {
    /// `C`: county, parish, or borough (FIPS)
    County,

    /// `Z`: public, fire, or marine forecast zone
    Zone,
}

/// A single county or zone, like `WIZ046`
///
/// Codes are always six characters: state, format, and either
/// a three-digit number or `ALL`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct UgcCode(String);

/// A decoded UGC string
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ugc {
    /// Counties and zones, in the order listed
    ///
    /// Ranges are expanded. Duplicates are kept.
    pub codes: Vec<UgcCode>,

    /// The expiration as transmitted, `DDHHMM`
    pub expiration: String,

    /// The expiration (UTC), once [merged](Ugc::merge)
    pub expires: Option<DateTime<Utc>>,
}

impl UgcCode {
    /// Two-letter state or marine area, like `WI`
    pub fn state(&self) -> &str {
        &self.0[0..2]
    }

    /// County or zone?
    pub fn kind(&self) -> UgcKind {
        if self.0.as_bytes()[2] == b'C' {
            UgcKind::County
        } else {
            UgcKind::Zone
        }
    }

    /// Three-digit number, or `ALL`
    pub fn number(&self) -> &str {
        &self.0[3..6]
    }

    /// Does this code cover the entire state?
    pub fn is_all(&self) -> bool {
        self.number() == "ALL"
    }

    /// Six-character string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UgcCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UgcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Ugc {
    /// Find and decode the UGC string in a segment
    ///
    /// Returns `Ok(None)` if the segment has no UGC. Only the
    /// first UGC string is decoded.
    ///
    /// ```
    /// use awips::Ugc;
    ///
    /// let ugc = Ugc::parse("WIZ046-047-051>053-ILC007-031200-\n\nTEXT")
    ///     .expect("bad UGC")
    ///     .expect("no UGC");
    /// let codes: Vec<&str> = ugc.codes.iter().map(|c| c.as_str()).collect();
    /// assert_eq!(
    ///     codes,
    ///     &["WIZ046", "WIZ047", "WIZ051", "WIZ052", "WIZ053", "ILC007"]
    /// );
    /// assert_eq!(ugc.expiration, "031200");
    /// assert_eq!(ugc.expires, None);
    /// ```
    pub fn parse(segment: &str) -> Result<Option<Ugc>, UgcError> {
        let mut lines = segment.lines().map(str::trim);
        let Some(first) = lines.by_ref().find(|l| starts_ugc(l)) else {
            return Ok(None);
        };

        // gather continuation lines until the expiration appears
        let mut joined = first.to_owned();
        while !has_expiration(&joined) {
            match lines.next() {
                Some(next) if !next.is_empty() && next.ends_with('-') => joined.push_str(next),
                _ => return Err(UgcError::MissingExpiration(joined)),
            }
        }

        parse_joined(&joined).map(Some)
    }

    /// Resolve the expiration time against the issuance time
    ///
    /// The `DDHHMM` expiration carries only the day of the
    /// month. The month and year are taken from `issued`. Merging
    /// more than once with the same `issued` time gives the same
    /// result.
    pub fn merge(&mut self, issued: &DateTime<Utc>) -> Result<DateTime<Utc>, InvalidDateErr> {
        let fields = datetime::parse_day_time(&self.expiration).ok_or(InvalidDateErr {})?;
        let expires = datetime::resolve_day_time(fields, issued)?;
        self.expires = Some(expires);
        Ok(expires)
    }

    /// Iterate over the codes as strings
    pub fn code_str_iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(UgcCode::as_str)
    }
}

// SSF followed by NNN or ALL, then a separator
fn starts_ugc(line: &str) -> bool {
    let b = line.as_bytes();
    b.len() >= 7
        && b[0].is_ascii_uppercase()
        && b[1].is_ascii_uppercase()
        && (b[2] == b'C' || b[2] == b'Z')
        && (b[3..6].iter().all(u8::is_ascii_digit) || &b[3..6] == b"ALL")
        && (b[6] == b'-' || b[6] == b'>')
}

fn has_expiration(joined: &str) -> bool {
    joined.split('-').any(is_expiration)
}

fn is_expiration(token: &str) -> bool {
    token.len() == 6 && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_number(token: &str) -> bool {
    token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit())
}

// Tokenize a complete UGC string, ending in DDHHMM-
fn parse_joined(joined: &str) -> Result<Ugc, UgcError> {
    let mut codes = Vec::new();
    let mut prefix: Option<&str> = None;
    let mut tokens = joined.split('-').map(str::trim).filter(|t| !t.is_empty());

    while let Some(token) = tokens.next() {
        if is_expiration(token) {
            let rest: Vec<&str> = tokens.by_ref().collect();
            if !rest.is_empty() {
                return Err(UgcError::TrailingCodes(rest.join("-")));
            }

            debug!("ugc: {} codes expiring {}", codes.len(), token);
            return Ok(Ugc {
                codes,
                expiration: token.to_owned(),
                expires: None,
            });
        }

        // a new SSF prefix, or numbers under the current one
        let numbers = if token.len() >= 6 && token.as_bytes()[..3].iter().all(u8::is_ascii_alphabetic)
        {
            let (ssf, numbers) = token.split_at(3);
            if !matches!(ssf.as_bytes()[2], b'C' | b'Z')
                || !ssf[..2].bytes().all(|b| b.is_ascii_uppercase())
            {
                return Err(UgcError::InvalidCode(token.to_owned()));
            }
            prefix = Some(ssf);
            numbers
        } else {
            token
        };

        let ssf = prefix.ok_or_else(|| UgcError::MissingPrefix(token.to_owned()))?;
        push_numbers(&mut codes, ssf, numbers, token)?;
    }

    Err(UgcError::MissingExpiration(joined.to_owned()))
}

// NNN, NNN>NNN, or ALL
fn push_numbers(
    codes: &mut Vec<UgcCode>,
    ssf: &str,
    numbers: &str,
    token: &str,
) -> Result<(), UgcError> {
    if numbers == "ALL" || is_number(numbers) {
        codes.push(UgcCode(format!("{}{}", ssf, numbers)));
        return Ok(());
    }

    let (from, to) = numbers
        .split_once('>')
        .filter(|(from, to)| is_number(from) && is_number(to))
        .ok_or_else(|| UgcError::InvalidCode(token.to_owned()))?;

    let from: u16 = from
        .parse()
        .map_err(|_| UgcError::InvalidCode(token.to_owned()))?;
    let to: u16 = to
        .parse()
        .map_err(|_| UgcError::InvalidCode(token.to_owned()))?;
    if from > to {
        return Err(UgcError::InvalidRange(token.to_owned()));
    }

    codes.extend((from..=to).map(|n| UgcCode(format!("{}{:03}", ssf, n))));
    Ok(())
}
