//! Transmission and AWIPS headers
//!
//! Every product begins with a fixed set of header lines:
//!
//! ```txt
//! 000
//! WUUS53 KMKX 031200
//! SVRMKX
//! ```
//!
//! 1. An optional transmission sequence number
//! 2. The WMO abbreviated heading: data type designator
//!    (`TTAAii`), originating center (`CCCC`), day and time of
//!    transmission (`DDHHMM`), and an optional indicator for
//!    corrections and amendments (`BBB`)
//! 3. The AWIPS identifier: a three-character product category
//!    (`NNN`) followed by a one- to three-character site (`xxx`)
//!
//! See NWS Directive 10-1701 and the WMO Manual on the Global
//! Telecommunication System.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::datetime::{self, InvalidDateErr};

/// Error classifying the product headers
///
/// Without its headers, a product cannot be decoded at all.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HeaderError {
    /// No WMO abbreviated heading where one was expected
    #[error("invalid product: no WMO heading found near \"{0}\"")]
    MissingWmo(String),

    /// No AWIPS identifier following the WMO heading
    #[error("invalid product: no AWIPS identifier found near \"{0}\"")]
    MissingAwips(String),
}

/// WMO abbreviated heading
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WmoHeader {
    /// The line as transmitted
    pub original: String,

    /// Transmission sequence number, if any
    pub sequence: Option<String>,

    /// Data type designator, like `WUUS53`
    pub datatype: String,

    /// Originating center, like `KMKX`
    pub office: String,

    /// Day and time of transmission, as `DDHHMM`
    pub datetime: String,

    /// Correction or amendment indicator, like `CCA`
    pub bbb: Option<String>,
}

/// AWIPS identifier (also known as the AFOS PIL)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AwipsHeader {
    /// The identifier as transmitted, like `SVRMKX`
    pub original: String,

    /// Product category, like `SVR`
    pub product: String,

    /// Issuing site, like `MKX`
    pub wfo: String,
}

impl WmoHeader {
    /// Transmission time (UTC)
    ///
    /// The WMO heading carries only the day of the month. The
    /// month and year are taken from the `anchor`, which should
    /// be within a couple of weeks of the true time.
    pub fn datetime(&self, anchor: &DateTime<Utc>) -> Result<DateTime<Utc>, InvalidDateErr> {
        let fields = datetime::parse_day_time(&self.datetime).ok_or(InvalidDateErr {})?;
        datetime::resolve_day_time(fields, anchor)
    }

    /// Is this a correction, amendment, or delayed repeat?
    pub fn is_revision(&self) -> bool {
        self.bbb.is_some()
    }

    // TTAAii CCCC DDHHMM [BBB]
    fn parse(line: &str, sequence: Option<&str>) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (datatype, office, datetime, bbb) = match tokens.as_slice() {
            &[datatype, office, datetime] => (datatype, office, datetime, None),
            &[datatype, office, datetime, bbb] => (datatype, office, datetime, Some(bbb)),
            _ => return None,
        };

        let datatype_ok = datatype.len() == 6
            && datatype.is_ascii()
            && datatype[..4].bytes().all(|b| b.is_ascii_uppercase())
            && datatype[4..].bytes().all(|b| b.is_ascii_digit());
        let office_ok = office.len() == 4 && office.bytes().all(is_upper_alnum);
        let bbb_ok = bbb.map_or(true, |b| {
            b.len() == 3 && b.bytes().all(|c| c.is_ascii_uppercase())
        });
        if !datatype_ok || !office_ok || !bbb_ok {
            return None;
        }
        datetime::parse_day_time(datetime)?;

        Some(Self {
            original: line.trim().to_owned(),
            sequence: sequence.map(str::to_owned),
            datatype: datatype.to_owned(),
            office: office.to_owned(),
            datetime: datetime.to_owned(),
            bbb: bbb.map(str::to_owned),
        })
    }
}

impl AwipsHeader {
    // NNNxxx, on a line by itself
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !(4..=6).contains(&line.len()) || !line.bytes().all(is_upper_alnum) {
            return None;
        }

        Some(Self {
            original: line.to_owned(),
            product: line[..3].to_owned(),
            wfo: line[3..].to_owned(),
        })
    }
}

impl fmt::Display for WmoHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.original.fmt(f)
    }
}

impl fmt::Display for AwipsHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.original.fmt(f)
    }
}

/// Classify the leading header lines of a product
///
/// Control characters which delimit the transmission
/// (SOH, ETX) and carriage returns are ignored. Blank lines
/// before and between the headers are skipped.
pub fn parse_headers(text: &str) -> Result<(WmoHeader, AwipsHeader), HeaderError> {
    let mut lines = text
        .lines()
        .map(|l| l.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_control()))
        .filter(|l| !l.is_empty());

    let mut first = lines.next().unwrap_or_default();
    let mut sequence = None;
    if first.bytes().all(|b| b.is_ascii_digit()) {
        sequence = Some(first);
        first = lines.next().unwrap_or_default();
    }

    let wmo = WmoHeader::parse(first, sequence)
        .ok_or_else(|| HeaderError::MissingWmo(snippet(first)))?;

    let next = lines.next().unwrap_or_default();
    let awips = AwipsHeader::parse(next).ok_or_else(|| HeaderError::MissingAwips(snippet(next)))?;

    Ok((wmo, awips))
}

fn is_upper_alnum(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}

fn snippet(line: &str) -> String {
    const MAX_SNIPPET: usize = 40;
    line.chars().take(MAX_SNIPPET).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn test_parse_headers() {
        const TEXT: &str = "\x01\r\r\n000 \r\r\nWUUS53 KMKX 031200\r\r\nSVRMKX\r\r\n\r\r\nBULLETIN";

        let (wmo, awips) = parse_headers(TEXT).expect("bad headers");
        assert_eq!(wmo.sequence.as_deref(), Some("000"));
        assert_eq!(wmo.datatype, "WUUS53");
        assert_eq!(wmo.office, "KMKX");
        assert_eq!(wmo.datetime, "031200");
        assert_eq!(wmo.bbb, None);
        assert!(!wmo.is_revision());
        assert_eq!(&format!("{}", wmo), "WUUS53 KMKX 031200");

        assert_eq!(awips.product, "SVR");
        assert_eq!(awips.wfo, "MKX");
        assert_eq!(&format!("{}", awips), "SVRMKX");

        let anchor = Utc.with_ymd_and_hms(2011, 12, 3, 11, 58, 0).unwrap();
        assert_eq!(
            wmo.datetime(&anchor).unwrap(),
            Utc.with_ymd_and_hms(2011, 12, 3, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_headers_variants() {
        // no sequence number, correction, short site
        let (wmo, awips) = parse_headers("ACUS11 KWNS 101945 CCA\nSWOMCD\n").unwrap();
        assert_eq!(wmo.sequence, None);
        assert_eq!(wmo.bbb.as_deref(), Some("CCA"));
        assert!(wmo.is_revision());
        assert_eq!(awips.product, "SWO");
        assert_eq!(awips.wfo, "MCD");

        let (_wmo, awips) = parse_headers("FXUS61 KBOX 101200\nAFDB\n").unwrap();
        assert_eq!(awips.product, "AFD");
        assert_eq!(awips.wfo, "B");
    }

    #[test]
    fn test_parse_headers_failures() {
        assert_eq!(
            Err(HeaderError::MissingWmo("".to_owned())),
            parse_headers("")
        );
        assert_eq!(
            Err(HeaderError::MissingWmo("Hello world".to_owned())),
            parse_headers("Hello world\nSVRMKX\n")
        );
        assert_eq!(
            Err(HeaderError::MissingWmo("WUUS53 KMKX 321200".to_owned())),
            parse_headers("WUUS53 KMKX 321200\nSVRMKX\n")
        );
        assert_eq!(
            Err(HeaderError::MissingWmo("WUX\u{e9}5 KMKX 031200".to_owned())),
            parse_headers("WUX\u{e9}5 KMKX 031200\nSVRMKX\n")
        );
        assert_eq!(
            Err(HeaderError::MissingAwips(
                "BULLETIN - IMMEDIATE BROADCAST REQUESTED".to_owned()
            )),
            parse_headers("WUUS53 KMKX 031200\nBULLETIN - IMMEDIATE BROADCAST REQUESTED\n")
        );
    }
}
