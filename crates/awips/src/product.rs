//! Text product assembly

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

use crate::builder::DecoderBuilder;
use crate::header::{self, AwipsHeader, HeaderError, WmoHeader};
use crate::issued::{self, IssuedError};
use crate::latlon::{LatLon, TimeMotLoc};
use crate::segment;
use crate::tags;
use crate::timezone::TimeZoneLookup;
use crate::ugc::{Ugc, UgcError};
use crate::vtec::{Vtec, VtecError};

/// Error decoding a text product
///
/// These errors prevent the product from being decoded at all.
/// Problems confined to a single segment or VTEC string are
/// reported as [`Warning`]s instead.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProductError {
    /// The WMO heading or AWIPS identifier is missing
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// The issuance line is present but unusable
    #[error("{source} (AWIPS: {awips})")]
    Issued {
        /// Underlying error
        source: IssuedError,

        /// AWIPS identifier of the product
        awips: String,
    },
}

/// A problem which did not prevent decoding
///
/// Warnings are returned alongside the decoded product and are
/// also logged.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Warning {
    /// No issuance line was found; the fallback time was used
    #[error("issue date was not found, defaulting to {0}")]
    MissingIssued(DateTime<Utc>),

    /// A VTEC string in the given segment was discarded
    #[error("segment {segment}: {source}")]
    Vtec {
        /// Segment index, from zero
        segment: usize,

        /// Underlying error
        source: VtecError,
    },

    /// The UGC of the given segment was discarded
    #[error("segment {segment}: {source}")]
    Ugc {
        /// Segment index, from zero
        segment: usize,

        /// Underlying error
        source: UgcError,
    },

    /// The UGC expiration of the given segment is not a valid date
    #[error("segment {segment}: invalid UGC expiration \"{expiration}\"")]
    UgcExpiration {
        /// Segment index, from zero
        segment: usize,

        /// Expiration as transmitted
        expiration: String,
    },
}

/// A decoded text product
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextProduct {
    /// The product text, as received
    pub text: String,

    /// WMO abbreviated heading
    pub wmo: WmoHeader,

    /// AWIPS identifier
    pub awips: AwipsHeader,

    /// Issuance time (UTC)
    pub issued: DateTime<Utc>,

    /// Product expiration: the earliest UGC expiration
    pub expires: Option<DateTime<Utc>>,

    /// Event end: the latest VTEC end time
    pub ends: Option<DateTime<Utc>>,

    /// Issuing site, like `MKX`
    pub office: String,

    /// Product category, like `SVR`
    pub product: String,

    /// Segments, in the order transmitted
    pub segments: Vec<Segment>,
}

/// One `$$`-terminated segment of a product
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment {
    /// Segment text, trimmed
    pub text: String,

    /// VTEC strings, in the order listed
    pub vtec: Vec<Vtec>,

    /// Counties and zones
    pub ugc: Option<Ugc>,

    /// Warning polygon
    pub latlon: Option<LatLon>,

    /// Impact tags
    pub tags: BTreeMap<String, String>,

    /// Storm time, motion, and location
    pub tml: Option<TimeMotLoc>,
}

/// A product and the warnings raised while decoding it
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoded {
    /// The decoded product
    pub product: TextProduct,

    /// Recoverable problems, in the order found
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warnings: Vec<Warning>,
}

/// Decodes text products
///
/// Create with a [`DecoderBuilder`]. A `Decoder` holds no state
/// between products and may be shared between threads.
#[derive(Clone, Debug)]
pub struct Decoder {
    timezones: Arc<dyn TimeZoneLookup>,
    received: Option<DateTime<Utc>>,
}

impl Decoder {
    /// Decode a text product
    ///
    /// The headers are classified and the issuance time is
    /// resolved once. The product is then split into segments.
    /// Each segment's UGC, VTEC, polygon, and storm motion are
    /// decoded independently: a bad VTEC string or UGC produces
    /// a [`Warning`] and is left out, but the rest of the product
    /// is kept.
    pub fn decode(&self, text: &str) -> Result<Decoded, ProductError> {
        let (wmo, awips) = header::parse_headers(text)?;

        let mut warnings = vec![];
        let issued = match self.issued(text) {
            Ok(Some(issued)) => issued,
            Ok(None) => {
                let fallback = self.fallback_time();
                warnings.push(Warning::MissingIssued(fallback));
                fallback
            }
            Err(source) => {
                return Err(ProductError::Issued {
                    source,
                    awips: awips.original,
                })
            }
        };

        // tags apply to the whole product
        let tags = tags::parse_tags(text);

        let segments: Vec<Segment> = segment::split_segments(text)
            .enumerate()
            .map(|(index, seg)| decode_segment(index, seg, &issued, &tags, &mut warnings))
            .collect();

        for warning in &warnings {
            warn!("{}: {}", awips.original, warning);
        }

        let expires = segments
            .iter()
            .filter_map(|seg| seg.ugc.as_ref().and_then(|ugc| ugc.expires))
            .min();

        let ends = segments
            .iter()
            .flat_map(|seg| seg.vtec.iter())
            .filter_map(Vtec::end_time)
            .max();

        debug!(
            "decoded {} ({}): {} segment(s)",
            awips.original,
            wmo,
            segments.len()
        );

        Ok(Decoded {
            product: TextProduct {
                text: text.to_owned(),
                office: awips.wfo.clone(),
                product: awips.product.clone(),
                wmo,
                awips,
                issued,
                expires,
                ends,
                segments,
            },
            warnings,
        })
    }

    /// Find and resolve the issuance line of `text`
    ///
    /// Returns `Ok(None)` if there is no issuance line.
    pub fn issued(&self, text: &str) -> Result<Option<DateTime<Utc>>, IssuedError> {
        issued::parse_issued(text, self.timezones.as_ref())
    }

    /// Issuance time assumed for products without one
    pub fn fallback_time(&self) -> DateTime<Utc> {
        self.received.unwrap_or_else(Utc::now)
    }
}

impl From<&DecoderBuilder> for Decoder {
    fn from(cfg: &DecoderBuilder) -> Self {
        Self {
            timezones: cfg.timezones().clone(),
            received: cfg.received_time(),
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        DecoderBuilder::default().build()
    }
}

impl TextProduct {
    /// Decode a text product with the default options
    ///
    /// See [`Decoder::decode`].
    pub fn new(text: &str) -> Result<Decoded, ProductError> {
        Decoder::default().decode(text)
    }

    /// True if any segment has VTEC
    pub fn has_vtec(&self) -> bool {
        self.segments.iter().any(Segment::has_vtec)
    }

    /// Iterate over every VTEC string in the product
    pub fn vtec_iter(&self) -> impl Iterator<Item = &Vtec> {
        self.segments.iter().flat_map(|seg| seg.vtec.iter())
    }
}

lazy_static! {
    static ref EMERGENCY: Regex =
        Regex::new(r"(TORNADO|FLASH\s+FLOOD)\s+EMERGENCY").expect("bad emergency regexp");
    static ref PDS: Regex = Regex::new(
        r"(THIS\s+IS\s+A|This\s+is\s+a)\s+PARTICULARLY\s+DANGEROUS\s+SITUATION"
    )
    .expect("bad PDS regexp");
}

impl Segment {
    /// True if the segment has VTEC
    pub fn has_vtec(&self) -> bool {
        !self.vtec.is_empty()
    }

    /// True if the segment has a UGC
    pub fn has_ugc(&self) -> bool {
        self.ugc.is_some()
    }

    /// True if the segment declares a tornado or flash flood emergency
    pub fn is_emergency(&self) -> bool {
        EMERGENCY.is_match(&self.text)
    }

    /// True if the segment declares a particularly dangerous situation
    pub fn is_pds(&self) -> bool {
        PDS.is_match(&self.text)
    }
}

fn decode_segment(
    index: usize,
    text: &str,
    issued: &DateTime<Utc>,
    tags: &BTreeMap<String, String>,
    warnings: &mut Vec<Warning>,
) -> Segment {
    let ugc = match Ugc::parse(text) {
        Ok(Some(mut ugc)) => {
            if ugc.merge(issued).is_err() {
                warnings.push(Warning::UgcExpiration {
                    segment: index,
                    expiration: ugc.expiration.clone(),
                });
            }
            Some(ugc)
        }
        Ok(None) => None,
        Err(source) => {
            warnings.push(Warning::Ugc {
                segment: index,
                source,
            });
            None
        }
    };

    let (vtec, errors) = Vtec::parse_all(text);
    warnings.extend(errors.into_iter().map(|source| Warning::Vtec {
        segment: index,
        source,
    }));

    Segment {
        text: text.to_owned(),
        vtec,
        ugc,
        latlon: LatLon::parse(text),
        tags: tags.clone(),
        tml: TimeMotLoc::parse(text, issued),
    }
}
