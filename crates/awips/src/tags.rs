//! Impact-based warning tags
//!
//! Warnings close with a block of tags that summarize the threat:
//!
//! ```txt
//! TORNADO...RADAR INDICATED
//! MAX HAIL SIZE...1.00 IN
//! MAX WIND GUST...60 MPH
//! ```
//!
//! Some offices write `KEY: VALUE` instead. Only the tags listed in
//! NWS Directive 10-1701 are recognized. Other lines are ignored.

use std::collections::BTreeMap;

use phf::phf_set;

/// Recognized tag keys
static TAG_KEYS: phf::Set<&'static str> = phf_set! {
    "TORNADO",
    "TORNADO DAMAGE THREAT",
    "THUNDERSTORM DAMAGE THREAT",
    "HAIL",
    "HAIL THREAT",
    "MAX HAIL SIZE",
    "WIND",
    "WIND THREAT",
    "MAX WIND GUST",
    "FLASH FLOOD",
    "FLASH FLOOD DAMAGE THREAT",
    "EXPECTED RAINFALL RATE",
    "WATERSPOUT",
    "SNOW SQUALL",
    "SNOW SQUALL IMPACT",
    "DAM FAILURE",
};

/// Find all recognized tags in `text`
///
/// Returns a map of upper-case tag key to its value. When a key
/// appears more than once, the last value wins.
///
/// ```
/// use awips::parse_tags;
///
/// let tags = parse_tags("HAIL THREAT...RADAR INDICATED\nMAX HAIL SIZE...1.00 IN\n");
/// assert_eq!(tags["MAX HAIL SIZE"], "1.00 IN");
/// ```
pub fn parse_tags(text: &str) -> BTreeMap<String, String> {
    text.lines().filter_map(parse_tag_line).collect()
}

fn parse_tag_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    let (key, value) = match line.split_once("...") {
        Some(kv) => kv,
        None => line.split_once(':')?,
    };

    let key = key.trim();
    let value = value.trim();
    if value.is_empty() || !TAG_KEYS.contains(key) {
        return None;
    }

    Some((key.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        const TEXT: &str = "\
TORNADO...RADAR INDICATED
TORNADO DAMAGE THREAT...CONSIDERABLE
MAX HAIL SIZE...1.50 IN
MAX WIND GUST: 70 MPH

LAT...LON 4305 8826 4311 8799 4290 8797 4284 8826
HAZARD...TORNADO AND QUARTER SIZE HAIL.
MAX HAIL SIZE...1.75 IN
";
        let tags = parse_tags(TEXT);
        assert_eq!(tags.len(), 4);
        assert_eq!(tags["TORNADO"], "RADAR INDICATED");
        assert_eq!(tags["TORNADO DAMAGE THREAT"], "CONSIDERABLE");
        assert_eq!(tags["MAX WIND GUST"], "70 MPH");

        // later tag wins
        assert_eq!(tags["MAX HAIL SIZE"], "1.75 IN");

        // not tags
        assert!(!tags.contains_key("LAT"));
        assert!(!tags.contains_key("HAZARD"));
    }

    #[test]
    fn test_parse_tags_empty() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags("TORNADO...\nHAIL:\n").is_empty());
        assert!(parse_tags("...THE NATIONAL WEATHER SERVICE HAS ISSUED...").is_empty());
    }
}
