//! Mesoscale discussions
//!
//! The Storm Prediction Center issues mesoscale discussions
//! (`SWOMCD`) ahead of possible watches:
//!
//! ```txt
//! Mesoscale Discussion 1234
//! NWS Storm Prediction Center Norman OK
//! 0245 PM CDT Mon Jun 10 2024
//!
//! Areas affected...Southern Minnesota into western Wisconsin
//!
//! Concerning...Severe potential...Watch likely
//!
//! Valid 101945Z - 102145Z
//!
//! Probability of Watch Issuance...80 percent
//! ```

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use thiserror::Error;

use super::SpecialProduct;
use crate::datetime;
use crate::issued::IssuedError;
use crate::latlon::LatLon;
use crate::product::Decoder;

/// A field of a mesoscale discussion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum McdField {
    /// Discussion number
    #[strum(serialize = "number")]
    Number,

    /// Validity window
    #[strum(serialize = "valid time")]
    Valid,

    /// Subject
    #[strum(serialize = "concerning text")]
    Concerning,

    /// Polygon
    #[strum(serialize = "polygon")]
    Polygon,

    /// Watch probability
    #[strum(serialize = "watch probability")]
    Probability,
}

/// Error decoding a mesoscale discussion
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum McdError {
    /// A required field is absent
    #[error("error parsing mcd: no {0} found")]
    MissingField(McdField),

    /// A field is present but cannot be decoded
    #[error("error parsing mcd {field}: \"{value}\"")]
    InvalidField {
        /// The offending field
        field: McdField,

        /// Its text
        value: String,
    },

    /// The issuance line is unusable
    #[error(transparent)]
    Issued(#[from] IssuedError),
}

/// A decoded mesoscale discussion
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MesoscaleDiscussion {
    /// The product text, as received
    pub original: String,

    /// Discussion number, which resets each year
    pub number: u16,

    /// Start of the validity window (UTC)
    pub issued: DateTime<Utc>,

    /// End of the validity window (UTC)
    pub expires: DateTime<Utc>,

    /// Subject, like `Severe potential...Watch likely`
    pub concerning: String,

    /// Area of concern
    pub polygon: LatLon,

    /// Probability that a watch will be issued, in percent
    ///
    /// Many discussions do not give one.
    pub watch_probability: Option<u8>,
}

lazy_static! {
    static ref NUMBER: Regex =
        Regex::new(r"Mesoscale Discussion\s+([0-9]{1,4})\b").expect("bad MCD number regexp");
    static ref VALID: Regex =
        Regex::new(r"(?m)(?:Valid|VALID)\s+([0-9]{6})Z\s+-\s+([0-9]{6})Z\s*$")
            .expect("bad MCD valid regexp");
    static ref CONCERNING: Regex =
        Regex::new(r"Concerning\.\.\.(.+)").expect("bad MCD concerning regexp");
    static ref PROBABILITY: Regex = Regex::new(r"Probability of Watch Issuance\.\.\.(.*)")
        .expect("bad MCD probability regexp");
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").expect("bad digits regexp");
}

impl SpecialProduct for MesoscaleDiscussion {
    const AWIPS_ID: &'static str = "SWOMCD";

    type Error = McdError;

    /// Decode a mesoscale discussion
    ///
    /// The validity window carries only day, hour, and minute. It
    /// is placed on the calendar near the product's issuance line,
    /// or near the decoder's fallback time if there is none.
    fn decode(text: &str, decoder: &Decoder) -> Result<Self, McdError> {
        let number = NUMBER
            .captures(text)
            .ok_or(McdError::MissingField(McdField::Number))?;
        let number = number[1]
            .parse()
            .map_err(|_| invalid(McdField::Number, &number[1]))?;

        let anchor = match decoder.issued(text)? {
            Some(issued) => issued,
            None => decoder.fallback_time(),
        };

        let valid = VALID
            .captures(text)
            .ok_or(McdError::MissingField(McdField::Valid))?;
        let issued = resolve(&valid[1], &anchor)?;
        let expires = resolve(&valid[2], &issued)?;

        let concerning = CONCERNING
            .captures(text)
            .map(|c| c[1].trim().to_owned())
            .filter(|c| !c.is_empty())
            .ok_or(McdError::MissingField(McdField::Concerning))?;

        let polygon = LatLon::parse(text).ok_or(McdError::MissingField(McdField::Polygon))?;

        let watch_probability = match PROBABILITY.captures(text) {
            Some(prob) => Some(parse_probability(prob[1].trim())?),
            None => None,
        };

        debug!(
            "mcd: #{} valid {} - {}, {} points",
            number,
            issued,
            expires,
            polygon.len()
        );

        Ok(Self {
            original: text.to_owned(),
            number,
            issued,
            expires,
            concerning,
            polygon,
            watch_probability,
        })
    }
}

fn resolve(field: &str, anchor: &DateTime<Utc>) -> Result<DateTime<Utc>, McdError> {
    datetime::parse_day_time(field)
        .and_then(|fields| datetime::resolve_day_time(fields, anchor).ok())
        .ok_or_else(|| invalid(McdField::Valid, field))
}

fn parse_probability(value: &str) -> Result<u8, McdError> {
    DIGITS
        .find(value)
        .and_then(|digits| digits.as_str().parse::<u8>().ok())
        .filter(|&pct| pct <= 100)
        .ok_or_else(|| invalid(McdField::Probability, value))
}

fn invalid(field: McdField, value: &str) -> McdError {
    McdError::InvalidField {
        field,
        value: value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;

    use crate::builder::DecoderBuilder;
    use crate::header;

    const MCD: &str = "\
000
ACUS11 KWNS 101945
SWOMCD
SPC MCD 101945
WIZ000-MNZ000-102145-

Mesoscale Discussion 1234
NWS Storm Prediction Center Norman OK
0245 PM CDT Mon Jun 10 2024

Areas affected...Southern Minnesota into western Wisconsin

Concerning...Severe potential...Watch likely

Valid 101945Z - 102145Z

Probability of Watch Issuance...80 percent

SUMMARY...Thunderstorms will intensify through the afternoon.

ATTN...WFO...MKX...ARX...MPX...

LAT...LON   43919313 44479204 44719098 44189043 43549122
            43919313

$$
";

    #[test]
    fn test_mcd() {
        let (_wmo, awips) = header::parse_headers(MCD).unwrap();
        assert!(MesoscaleDiscussion::applies_to(&awips));

        let mcd = MesoscaleDiscussion::decode(MCD, &Decoder::default()).expect("bad MCD");
        assert_eq!(mcd.number, 1234);
        assert_eq!(mcd.issued, Utc.with_ymd_and_hms(2024, 6, 10, 19, 45, 0).unwrap());
        assert_eq!(mcd.expires, Utc.with_ymd_and_hms(2024, 6, 10, 21, 45, 0).unwrap());
        assert_eq!(mcd.concerning, "Severe potential...Watch likely");
        assert_eq!(mcd.watch_probability, Some(80));
        assert_eq!(mcd.polygon.len(), 6);
        assert!(mcd.polygon.is_closed());
        assert_approx_eq!(mcd.polygon.polygon[0].0, 43.91);
        assert_approx_eq!(mcd.polygon.polygon[0].1, -93.13);
    }

    #[test]
    fn test_mcd_optional_probability() {
        let text = MCD.replace("Probability of Watch Issuance...80 percent\n", "");
        let mcd = MesoscaleDiscussion::decode(&text, &Decoder::default()).expect("bad MCD");
        assert_eq!(mcd.watch_probability, None);

        let text = MCD.replace("80 percent", "percent");
        assert_eq!(
            MesoscaleDiscussion::decode(&text, &Decoder::default()),
            Err(McdError::InvalidField {
                field: McdField::Probability,
                value: "percent".to_owned()
            })
        );
    }

    #[test]
    fn test_mcd_fallback_time() {
        // valid time crosses into the next month
        let text = MCD
            .replace("0245 PM CDT Mon Jun 10 2024\n", "")
            .replace("Valid 101945Z - 102145Z", "VALID 302300Z - 010100Z");
        let decoder = DecoderBuilder::new()
            .with_received_time(Utc.with_ymd_and_hms(2024, 6, 30, 23, 0, 0).unwrap())
            .build();

        let mcd = MesoscaleDiscussion::decode(&text, &decoder).expect("bad MCD");
        assert_eq!(mcd.issued, Utc.with_ymd_and_hms(2024, 6, 30, 23, 0, 0).unwrap());
        assert_eq!(mcd.expires, Utc.with_ymd_and_hms(2024, 7, 1, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_mcd_missing_fields() {
        let decoder = Decoder::default();

        let text = MCD.replace("Mesoscale Discussion 1234", "Mesoscale Discussion");
        assert_eq!(
            MesoscaleDiscussion::decode(&text, &decoder),
            Err(McdError::MissingField(McdField::Number))
        );

        let text = MCD.replace("Valid 101945Z - 102145Z", "");
        assert_eq!(
            MesoscaleDiscussion::decode(&text, &decoder),
            Err(McdError::MissingField(McdField::Valid))
        );

        let text = MCD.replace("Concerning...", "");
        assert_eq!(
            MesoscaleDiscussion::decode(&text, &decoder),
            Err(McdError::MissingField(McdField::Concerning))
        );

        let text = MCD.replace("LAT...LON", "");
        assert_eq!(
            MesoscaleDiscussion::decode(&text, &decoder),
            Err(McdError::MissingField(McdField::Polygon))
        );

        assert_eq!(
            "error parsing mcd: no valid time found",
            format!("{}", McdError::MissingField(McdField::Valid))
        );
    }
}
