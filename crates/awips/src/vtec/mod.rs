//! Valid Time Event Code (VTEC)
//!
//! A P-VTEC string tracks one hazard event through its
//! lifecycle:
//!
//! ```txt
//! /O.NEW.KMKX.GL.A.0002.111203T0000Z-111203T1200Z/
//!  | |   |    |  | |    |            |
//!  | |   |    |  | |    |            +- event end
//!  | |   |    |  | |    +- event start
//!  | |   |    |  | +- event tracking number
//!  | |   |    |  +- significance
//!  | |   |    +- phenomena
//!  | |   +- issuing office
//!  | +- action
//!  +- product class
//! ```
//!
//! Hydrologic products follow their P-VTEC with an H-VTEC
//! string, like `/CFVK1.3.ER.110629T1727Z.110702T0000Z.000000T0000Z.NR/`.
//! H-VTEC is recognized and skipped.
//!
//! See NWS Directive 10-1703.

mod action;
mod class;
mod phenomena;
mod significance;

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::debug;
use thiserror::Error;

pub use action::Action;
pub use class::ProductClass;
pub use phenomena::Phenomena;
pub use significance::Significance;

/// Sentinel for an unspecified VTEC time
///
/// An all-zero VTEC time, `000000T0000Z`, means that the event
/// has no fixed start (it is already in progress) or no fixed end
/// (it is ongoing until further notice). Such times decode to this
/// instant, which lies before any real event. It is not an error.
pub const UNSPECIFIED: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// A decoded P-VTEC string
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vtec {
    /// The string as transmitted, without delimiters
    pub original: String,

    /// Product class
    pub class: ProductClass,

    /// What the product does to the event
    pub action: Action,

    /// Four-letter issuing office, like `KMKX`
    pub office: String,

    /// Hazard phenomena
    pub phenomena: Phenomena,

    /// Hazard significance
    pub significance: Significance,

    /// Event tracking number
    pub event_number: u16,

    /// Event start, or [`UNSPECIFIED`]
    ///
    /// With the `serde` feature, unspecified times serialize as
    /// `None`.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_time"))]
    pub start: DateTime<Utc>,

    /// Event end, or [`UNSPECIFIED`]
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_time"))]
    pub end: DateTime<Utc>,
}

/// Error decoding a VTEC string
///
/// The VTEC string was recognized by its shape but one of its
/// fields is not valid. Only this string is discarded; other
/// VTEC strings in the same product are unaffected.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("invalid VTEC \"{line}\": {kind}")]
pub struct VtecError {
    line: String,
    kind: VtecErrorKind,
}

/// Which VTEC field is invalid
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VtecErrorKind {
    /// Unknown product class
    #[error("unrecognized product class \"{0}\"")]
    Class(String),

    /// Unknown action
    #[error("unrecognized action \"{0}\"")]
    Action(String),

    /// Office is not four letters
    #[error("invalid office \"{0}\"")]
    Office(String),

    /// Unknown phenomena
    #[error("unrecognized phenomena \"{0}\"")]
    Phenomena(String),

    /// Unknown significance
    #[error("unrecognized significance \"{0}\"")]
    Significance(String),

    /// Event number is not a positive four-digit number
    #[error("invalid event number \"{0}\"")]
    EventNumber(String),

    /// Time range is not two times joined by a hyphen
    #[error("invalid time range \"{0}\"")]
    TimeRange(String),

    /// Time lacks its trailing `Z`
    #[error("time \"{0}\" is missing its zone marker")]
    MissingZone(String),

    /// Time is not a valid `YYMMDDTHHMMZ`
    #[error("invalid time \"{0}\"")]
    Time(String),
}

/// All errors from decoding the VTEC in some text
///
/// Errors are listed in the order their VTEC strings appear.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VtecErrors(Vec<VtecError>);

impl Vtec {
    /// Decode every VTEC string in `text`
    ///
    /// Each line of `text` is examined separately. Returns all
    /// valid P-VTEC in the order they appear, together with one
    /// error for each line which looked like P-VTEC but failed
    /// validation. A bad line never prevents later lines from
    /// decoding.
    ///
    /// Lines which do not split into exactly seven fields are not
    /// VTEC at all and are ignored without error. H-VTEC strings
    /// are also ignored.
    ///
    /// ```
    /// use awips::{Phenomena, Vtec};
    ///
    /// let (vtec, errs) = Vtec::parse_all("
    ///   /O.NEW.KPSR.DU.Y.0001.120105T1400Z-120106T0400Z/
    ///   /O.EX.KPSR.WI.Y.0001.120105T1000Z-120106T0400Z/
    /// ");
    /// assert_eq!(1, vtec.len());
    /// assert_eq!(Phenomena::BlowingDust, vtec[0].phenomena);
    /// assert_eq!(1, errs.len());
    /// ```
    pub fn parse_all(text: &str) -> (Vec<Vtec>, VtecErrors) {
        let mut out = Vec::new();
        let mut errs = VtecErrors::default();

        for line in text.lines() {
            match Self::parse_line(line) {
                Some(Ok(vtec)) => out.push(vtec),
                Some(Err(err)) => {
                    debug!("vtec: {}", err);
                    errs.0.push(err);
                }
                None => {}
            }
        }

        (out, errs)
    }

    /// Decode one line of text as VTEC
    ///
    /// Returns `None` if the line is not a P-VTEC candidate at all.
    /// The leading and trailing `/` are each optional.
    pub fn parse_line(line: &str) -> Option<Result<Vtec, VtecError>> {
        let body = line.trim();
        let body = body.strip_prefix('/').unwrap_or(body);
        let body = body.strip_suffix('/').unwrap_or(body);

        let fields = split_fields(body)?;
        if is_hvtec(&fields) {
            debug!("vtec: skipping H-VTEC \"{}\"", body);
            return None;
        }

        Some(Self::from_fields(&fields).map_err(|kind| VtecError {
            line: body.to_owned(),
            kind,
        }))
    }

    /// Event start, unless unspecified
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        specified(self.start)
    }

    /// Event end, unless unspecified
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        specified(self.end)
    }

    /// Is the event already in progress when issued?
    pub fn is_ongoing(&self) -> bool {
        self.start == UNSPECIFIED
    }

    /// Event identifier
    ///
    /// Uniquely identifies the event within a year, like
    /// `KMKX.GL.A.0002`.
    pub fn event_id(&self) -> String {
        format!(
            "{}.{:#}.{:#}.{:04}",
            self.office, self.phenomena, self.significance, self.event_number
        )
    }

    fn from_fields(fields: &[&str; 7]) -> Result<Vtec, VtecErrorKind> {
        let [class, action, office, phenomena, significance, event_number, range] = *fields;

        let class = ProductClass::parse(class).ok_or(VtecErrorKind::Class(class.to_owned()))?;
        let action = Action::parse(action).ok_or(VtecErrorKind::Action(action.to_owned()))?;
        if office.len() != 4 || !office.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(VtecErrorKind::Office(office.to_owned()));
        }
        let phenomena =
            Phenomena::parse(phenomena).ok_or(VtecErrorKind::Phenomena(phenomena.to_owned()))?;
        let significance = Significance::parse(significance)
            .ok_or(VtecErrorKind::Significance(significance.to_owned()))?;
        let event_number = parse_event_number(event_number)
            .ok_or(VtecErrorKind::EventNumber(event_number.to_owned()))?;

        let (start, end) = range
            .split_once('-')
            .ok_or(VtecErrorKind::TimeRange(range.to_owned()))?;
        let start = parse_time(start)?;
        let end = parse_time(end)?;

        Ok(Vtec {
            original: fields.join("."),
            class,
            action,
            office: office.to_owned(),
            phenomena,
            significance,
            event_number,
            start,
            end,
        })
    }
}

impl fmt::Display for Vtec {
    /// Printable string
    ///
    /// * The normal form is the VTEC string, with delimiters
    /// * The alternate form is a human-readable summary
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(
                f,
                "{} {} {} ({}) #{}",
                self.phenomena, self.significance, self.action, self.office, self.event_number
            )
        } else {
            write!(f, "/{}/", self.original)
        }
    }
}

impl VtecError {
    /// The offending VTEC string, without delimiters
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Which field was invalid
    pub fn kind(&self) -> &VtecErrorKind {
        &self.kind
    }
}

impl VtecErrors {
    /// True if no errors occurred
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over errors
    pub fn iter(&self) -> std::slice::Iter<'_, VtecError> {
        self.0.iter()
    }

    /// Merge in the errors from `other`
    pub fn extend(&mut self, other: VtecErrors) {
        self.0.extend(other.0)
    }

    /// Convert to `Result`
    ///
    /// Returns `Err(self)` if there are any errors.
    pub fn into_result(self) -> Result<(), VtecErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for VtecErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} VTEC error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for VtecErrors {}

impl IntoIterator for VtecErrors {
    type Item = VtecError;
    type IntoIter = std::vec::IntoIter<VtecError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VtecErrors {
    type Item = &'a VtecError;
    type IntoIter = std::slice::Iter<'a, VtecError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Split a VTEC candidate into its seven fields
//
// VTEC is a single run of uppercase letters, digits, dots,
// and one hyphen. Anything else, or any other field count,
// is not VTEC.
fn split_fields(body: &str) -> Option<[&str; 7]> {
    if body.is_empty()
        || !body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
    {
        return None;
    }

    let fields: Vec<&str> = body.split('.').collect();
    if fields.iter().any(|f| f.is_empty()) {
        return None;
    }

    fields.try_into().ok()
}

// H-VTEC begins with a five-character location identifier
// (or `00000`) where P-VTEC has its one-character class.
fn is_hvtec(fields: &[&str; 7]) -> bool {
    fields[0].len() == 5
}

fn parse_event_number(field: &str) -> Option<u16> {
    if field.len() != 4 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok().filter(|&n| n > 0)
}

// YYMMDDTHHMMZ
fn parse_time(field: &str) -> Result<DateTime<Utc>, VtecErrorKind> {
    let bad = || VtecErrorKind::Time(field.to_owned());

    let body = field
        .strip_suffix('Z')
        .ok_or_else(|| VtecErrorKind::MissingZone(field.to_owned()))?;
    let (date, time) = body.split_once('T').ok_or_else(bad)?;
    if date.len() != 6
        || time.len() != 4
        || !date.bytes().chain(time.bytes()).all(|b| b.is_ascii_digit())
    {
        return Err(bad());
    }

    if date == "000000" && time == "0000" {
        return Ok(UNSPECIFIED);
    }

    let year: i32 = date[0..2].parse().map_err(|_| bad())?;
    let month: u32 = date[2..4].parse().map_err(|_| bad())?;
    let day: u32 = date[4..6].parse().map_err(|_| bad())?;
    let hour: u32 = time[0..2].parse().map_err(|_| bad())?;
    let minute: u32 = time[2..4].parse().map_err(|_| bad())?;

    let naive = NaiveDate::from_ymd_opt(2000 + year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .ok_or_else(bad)?;

    Ok(Utc.from_utc_datetime(&naive))
}

fn specified(time: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if time == UNSPECIFIED {
        None
    } else {
        Some(time)
    }
}

#[cfg(feature = "serde")]
fn serialize_time<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serde::Serialize::serialize(&specified(*time), serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(text: &str) -> Vtec {
        let (mut vtec, errs) = Vtec::parse_all(text);
        assert!(errs.is_empty(), "unexpected errors: {}", errs);
        assert_eq!(vtec.len(), 1);
        vtec.remove(0)
    }

    #[test]
    fn test_vtec() {
        let vtec = parse_one("/O.NEW.KMKX.GL.A.0002.111203T0000Z-111203T1200Z/");
        assert_eq!(vtec.class, ProductClass::Operational);
        assert_eq!(vtec.action, Action::New);
        assert_eq!(vtec.office, "KMKX");
        assert_eq!(vtec.phenomena, Phenomena::Gale);
        assert_eq!(vtec.significance, Significance::Watch);
        assert_eq!(vtec.event_number, 2);
        assert_eq!(vtec.start, Utc.with_ymd_and_hms(2011, 12, 3, 0, 0, 0).unwrap());
        assert_eq!(vtec.end, Utc.with_ymd_and_hms(2011, 12, 3, 12, 0, 0).unwrap());
        assert!(!vtec.is_ongoing());
        assert_eq!(vtec.event_id(), "KMKX.GL.A.0002");
        assert_eq!(
            &format!("{}", vtec),
            "/O.NEW.KMKX.GL.A.0002.111203T0000Z-111203T1200Z/"
        );
        assert_eq!(&format!("{:#}", vtec), "Gale Watch New (KMKX) #2");
    }

    #[test]
    fn test_vtec_unspecified_times() {
        let vtec = parse_one("/O.EXT.KICT.FL.W.0007.000000T0000Z-000000T0000Z/");
        assert_eq!(vtec.action, Action::ExtendedTime);
        assert_eq!(vtec.office, "KICT");
        assert_eq!(vtec.phenomena, Phenomena::Flood);
        assert_eq!(vtec.significance, Significance::Warning);
        assert_eq!(vtec.event_number, 7);
        assert_eq!(vtec.start, UNSPECIFIED);
        assert_eq!(vtec.end, UNSPECIFIED);
        assert_eq!(vtec.start_time(), None);
        assert_eq!(vtec.end_time(), None);
        assert!(vtec.is_ongoing());

        let vtec = parse_one("/O.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z/");
        assert_eq!(vtec.action, Action::Continued);
        assert_eq!(vtec.phenomena, Phenomena::CoastalFlood);
        assert_eq!(vtec.significance, Significance::Advisory);
        assert_eq!(vtec.event_number, 4);
        assert_eq!(vtec.start, UNSPECIFIED);
        assert_eq!(
            vtec.end_time(),
            Some(Utc.with_ymd_and_hms(2011, 4, 8, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_vtec_optional_delimiters() {
        let both = parse_one("/O.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z/");
        let trailing = parse_one("O.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z/");
        let leading = parse_one("/O.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z");
        let neither = parse_one("O.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z");
        assert_eq!(both, trailing);
        assert_eq!(both, leading);
        assert_eq!(both, neither);
    }

    #[test]
    fn test_vtec_invalid() {
        // missing Z
        let (vtec, errs) = Vtec::parse_all("O.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500");
        assert!(vtec.is_empty());
        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs.iter().next().unwrap().kind(),
            &VtecErrorKind::MissingZone("110408T1500".to_owned())
        );

        // invalid class
        let (vtec, errs) = Vtec::parse_all("/L.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z/");
        assert!(vtec.is_empty());
        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs.iter().next().unwrap().kind(),
            &VtecErrorKind::Class("L".to_owned())
        );

        // invalid significance
        let (vtec, errs) = Vtec::parse_all("/O.CON.KLWX.CF.T.0004.000000T0000Z-110408T1500Z/");
        assert!(vtec.is_empty());
        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs.iter().next().unwrap().line(),
            "O.CON.KLWX.CF.T.0004.000000T0000Z-110408T1500Z"
        );

        // invalid phenomena, event number, and dates
        for line in [
            "/O.CON.KLWX.QQ.Y.0004.000000T0000Z-110408T1500Z/",
            "/O.CON.KLWX.CF.N.0004.000000T0000Z-110408T1500Z/",
            "/O.CON.KLWX.CF.Y.0000.000000T0000Z-110408T1500Z/",
            "/O.CON.KLWX.CF.Y.04.000000T0000Z-110408T1500Z/",
            "/O.CON.KLWX.CF.Y.0004.000000T0000Z/",
            "/O.CON.KLWX.CF.Y.0004.000000T0000Z-111308T1500Z/",
            "/O.CON.KLW.CF.Y.0004.000000T0000Z-110408T1500Z/",
        ] {
            let (vtec, errs) = Vtec::parse_all(line);
            assert!(vtec.is_empty(), "{}", line);
            assert_eq!(errs.len(), 1, "{}", line);
        }
    }

    #[test]
    fn test_vtec_not_candidates() {
        // wrong field count: silently skipped
        let (vtec, errs) = Vtec::parse_all("/O.CON.KLWX.CF.0004.000000T0000Z-110408T1500Z/");
        assert!(vtec.is_empty());
        assert!(errs.is_empty());

        // ordinary product text
        let (vtec, errs) = Vtec::parse_all(
            "...UPDATE...\n\
             ...GALE WATCH IN EFFECT FROM SATURDAY EVENING THROUGH SUNDAY MORNING...\n\
             WWW.WEATHER.GOV/MKX\n\
             HAIL...1.00IN\n\
             $$\n\
             &&\n",
        );
        assert!(vtec.is_empty());
        assert!(errs.is_empty());
    }

    #[test]
    fn test_multi_vtec() {
        let (vtec, errs) = Vtec::parse_all(
            "
/O.NEW.KPSR.DU.Y.0001.120105T1400Z-120106T0400Z/
/O.EXT.KPSR.WI.Y.0001.120105T1000Z-120106T0400Z/
	",
        );
        assert!(errs.is_empty());
        assert_eq!(vtec.len(), 2);
        assert_eq!(vtec[0].phenomena, Phenomena::BlowingDust);
        assert_eq!(vtec[1].phenomena, Phenomena::Wind);

        // one P-VTEC, one H-VTEC
        let (vtec, errs) = Vtec::parse_all(
            "
/O.EXT.KICT.FL.W.0010.000000T0000Z-000000T0000Z/
/CFVK1.3.ER.110629T1727Z.110702T0000Z.000000T0000Z.NR/
	",
        );
        assert!(errs.is_empty());
        assert_eq!(vtec.len(), 1);

        // first valid, second malformed
        let (vtec, errs) = Vtec::parse_all(
            "
/O.NEW.KPSR.DU.Y.0001.120105T1400Z-120106T0400Z/
/O.EX.KPSR.WI.Y.0001.120105T1000Z-120106T0400Z/
	",
        );
        assert_eq!(errs.len(), 1);
        assert_eq!(vtec.len(), 1);
        assert_eq!(
            errs.into_iter().next().unwrap().kind(),
            &VtecErrorKind::Action("EX".to_owned())
        );
    }

    #[test]
    fn test_vtec_errors_display() {
        let (_vtec, errs) = Vtec::parse_all("/L.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z/");
        assert_eq!(
            &format!("{}", errs),
            "1 VTEC error(s)\n  invalid VTEC \"L.CON.KLWX.CF.Y.0004.000000T0000Z-110408T1500Z\": unrecognized product class \"L\""
        );
        assert!(errs.into_result().is_err());
        assert!(VtecErrors::default().into_result().is_ok());
    }
}
