//! Time zone abbreviations used in NWS products
//!
//! | Abbreviation | Offset | Zone                          |
//! |--------------|--------|-------------------------------|
//! | `UTC`, `GMT` | +00:00 | Coordinated Universal Time    |
//! | `AST`        | -04:00 | Atlantic Standard Time        |
//! | `ADT`        | -03:00 | Atlantic Daylight Time        |
//! | `EST`        | -05:00 | Eastern Standard Time         |
//! | `EDT`        | -04:00 | Eastern Daylight Time         |
//! | `CST`        | -06:00 | Central Standard Time         |
//! | `CDT`        | -05:00 | Central Daylight Time         |
//! | `MST`        | -07:00 | Mountain Standard Time        |
//! | `MDT`        | -06:00 | Mountain Daylight Time        |
//! | `PST`        | -08:00 | Pacific Standard Time         |
//! | `PDT`        | -07:00 | Pacific Daylight Time         |
//! | `AKST`       | -09:00 | Alaska Standard Time          |
//! | `AKDT`       | -08:00 | Alaska Daylight Time          |
//! | `HST`        | -10:00 | Hawaii-Aleutian Standard Time |
//! | `HDT`        | -09:00 | Hawaii-Aleutian Daylight Time |
//! | `SST`        | -11:00 | Samoa Standard Time           |
//! | `CHST`       | +10:00 | Chamorro Standard Time        |
//!
//! NWS products spell out whether standard or daylight time is
//! in effect, so every abbreviation maps to a single fixed offset.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use chrono::FixedOffset;
use phf::phf_map;

/// Resolves a time zone abbreviation to a UTC offset
///
/// The decoder consults a `TimeZoneLookup` whenever a product's
/// issuance line is written in local time. The default table
/// is [`NwsTimeZones`], but any other table may be supplied via
/// the [`DecoderBuilder`](crate::DecoderBuilder).
///
/// ```
/// use std::collections::HashMap;
/// use chrono::FixedOffset;
/// use awips::{NwsTimeZones, TimeZoneLookup};
///
/// assert_eq!(FixedOffset::west_opt(5 * 3600), NwsTimeZones.lookup("CDT"));
///
/// let mut custom = HashMap::new();
/// custom.insert("XST".to_owned(), FixedOffset::east_opt(3600).unwrap());
/// assert_eq!(FixedOffset::east_opt(3600), custom.lookup("XST"));
/// assert_eq!(None, custom.lookup("CDT"));
/// ```
pub trait TimeZoneLookup: fmt::Debug + Send + Sync {
    /// Obtain the UTC offset for `abbreviation`, if known
    fn lookup(&self, abbreviation: &str) -> Option<FixedOffset>;
}

/// Time zones which appear in NWS products
///
/// Lookups are case-insensitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NwsTimeZones;

impl TimeZoneLookup for NwsTimeZones {
    fn lookup(&self, abbreviation: &str) -> Option<FixedOffset> {
        let key = abbreviation.to_ascii_uppercase();
        TIMEZONES
            .get(key.as_str())
            .and_then(|&secs| FixedOffset::east_opt(secs))
    }
}

/// Exact-match lookup, for caller-supplied tables
impl<S> TimeZoneLookup for HashMap<String, FixedOffset, S>
where
    S: BuildHasher + Send + Sync,
{
    fn lookup(&self, abbreviation: &str) -> Option<FixedOffset> {
        self.get(abbreviation).copied()
    }
}

// offsets are seconds east of UTC
static TIMEZONES: phf::Map<&'static str, i32> = phf_map! {
    "UTC" => 0,
    "GMT" => 0,
    "AST" => -4 * HOUR,
    "ADT" => -3 * HOUR,
    "EST" => -5 * HOUR,
    "EDT" => -4 * HOUR,
    "CST" => -6 * HOUR,
    "CDT" => -5 * HOUR,
    "MST" => -7 * HOUR,
    "MDT" => -6 * HOUR,
    "PST" => -8 * HOUR,
    "PDT" => -7 * HOUR,
    "AKST" => -9 * HOUR,
    "AKDT" => -8 * HOUR,
    "HST" => -10 * HOUR,
    "HDT" => -9 * HOUR,
    "HAST" => -10 * HOUR,
    "HADT" => -9 * HOUR,
    "SST" => -11 * HOUR,
    "CHST" => 10 * HOUR,
};

const HOUR: i32 = 3600;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nws_time_zones() {
        assert_eq!(FixedOffset::east_opt(0), NwsTimeZones.lookup("UTC"));
        assert_eq!(FixedOffset::west_opt(6 * 3600), NwsTimeZones.lookup("CST"));
        assert_eq!(FixedOffset::west_opt(4 * 3600), NwsTimeZones.lookup("edt"));
        assert_eq!(FixedOffset::west_opt(9 * 3600), NwsTimeZones.lookup("AKST"));
        assert_eq!(FixedOffset::east_opt(10 * 3600), NwsTimeZones.lookup("ChST"));
        assert_eq!(None, NwsTimeZones.lookup("XYZ"));
        assert_eq!(None, NwsTimeZones.lookup(""));
    }

    #[test]
    fn test_table_completeness() {
        for (abbr, secs) in TIMEZONES.entries() {
            assert!(abbr.len() == 3 || abbr.len() == 4, "{}", abbr);
            assert!(FixedOffset::east_opt(*secs).is_some(), "{}", abbr);
        }
    }
}
