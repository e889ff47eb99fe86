use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::product::Decoder;
use crate::timezone::{NwsTimeZones, TimeZoneLookup};

/// Builds a text product decoder
///
/// The defaults are suitable for live products: local issuance
/// times are resolved with the standard NWS
/// [time zone abbreviations](crate::NwsTimeZones), and products
/// without an issuance line are assumed to have been issued
/// right now.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use awips::DecoderBuilder;
///
/// let decoder = DecoderBuilder::new()
///     .with_received_time(Utc.with_ymd_and_hms(2024, 6, 10, 21, 0, 0).unwrap())
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct DecoderBuilder {
    timezones: Arc<dyn TimeZoneLookup>,
    received: Option<DateTime<Utc>>,
}

impl DecoderBuilder {
    /// New decoder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a decoder
    pub fn build(&self) -> Decoder {
        Decoder::from(self)
    }

    /// Time zone table for local issuance times
    ///
    /// Replaces the standard NWS table. Any
    /// [`TimeZoneLookup`](crate::TimeZoneLookup) will do, including
    /// a `HashMap<String, FixedOffset>`.
    pub fn with_timezones<Z>(&mut self, zones: Z) -> &mut Self
    where
        Z: TimeZoneLookup + 'static,
    {
        self.timezones = Arc::new(zones);
        self
    }

    /// Fallback issuance time
    ///
    /// Products which lack an issuance line are assumed to have
    /// been issued at `received`. Archived products should set
    /// this to their receipt time. If unset, the current time is
    /// used.
    pub fn with_received_time(&mut self, received: DateTime<Utc>) -> &mut Self {
        self.received = Some(received);
        self
    }

    /// Time zone table
    pub fn timezones(&self) -> &Arc<dyn TimeZoneLookup> {
        &self.timezones
    }

    /// Fallback issuance time, if set
    pub fn received_time(&self) -> Option<DateTime<Utc>> {
        self.received
    }
}

impl Default for DecoderBuilder {
    fn default() -> Self {
        Self {
            timezones: Arc::new(NwsTimeZones),
            received: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_builder() {
        let mut builder = DecoderBuilder::new();
        assert!(builder.received_time().is_none());
        assert!(builder.timezones().lookup("CDT").is_some());

        let mut zones = HashMap::new();
        zones.insert("XST".to_owned(), FixedOffset::east_opt(3600).unwrap());
        let received = Utc.with_ymd_and_hms(2024, 6, 10, 21, 0, 0).unwrap();
        builder.with_timezones(zones).with_received_time(received);

        assert_eq!(builder.received_time(), Some(received));
        assert!(builder.timezones().lookup("CDT").is_none());
        assert!(builder.timezones().lookup("XST").is_some());
    }
}
