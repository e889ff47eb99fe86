//! # awips: NWS Text Product Decoding
//!
//! This crate decodes the text products issued by the United States
//! [National Weather Service](https://www.weather.gov/) (NWS) over
//! AWIPS, the NOAA Weather Wire, and the EMWIN broadcast. Watches,
//! warnings, advisories, and forecast discussions are all text
//! products.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate has not been certified for any purpose. The author
//! **strongly discourages** its use in any safety-critical
//! applications. Always have at least two methods available for
//! receiving weather alerts.
//!
//! ## Example
//!
//! Obtaining products is beyond the scope of this crate. Once you
//! have the raw text of one product, decode it:
//!
//! ```
//! use awips::{Phenomena, Significance, TextProduct};
//!
//! let text = "\
//! 000
//! WUUS53 KMKX 102156
//! SVRMKX
//! WIC133-102230-
//! /O.NEW.KMKX.SV.W.0042.240610T2156Z-240610T2230Z/
//!
//! BULLETIN - EAS ACTIVATION REQUESTED
//! Severe Thunderstorm Warning
//! National Weather Service Milwaukee/Sullivan WI
//! 456 PM CDT Mon Jun 10 2024
//!
//! LAT...LON 4305 8826 4311 8799 4290 8797 4284 8826
//!
//! MAX HAIL SIZE...1.00 IN
//!
//! $$
//! ";
//!
//! // in actual implementations, handle this error gracefully!
//! let decoded = TextProduct::new(text).expect("invalid product");
//! let product = &decoded.product;
//! assert_eq!("SVR", product.product);
//! assert_eq!("MKX", product.office);
//!
//! // products are divided into segments, each of which
//! // may carry VTEC, a list of zones, and a polygon
//! let segment = &product.segments[0];
//! let vtec = &segment.vtec[0];
//! assert_eq!(Phenomena::SevereThunderstorm, vtec.phenomena);
//! assert_eq!(Significance::Warning, vtec.significance);
//! assert_eq!(
//!     Some("WIC133"),
//!     segment.ugc.as_ref().and_then(|ugc| ugc.code_str_iter().next())
//! );
//! assert_eq!(4, segment.latlon.as_ref().unwrap().len());
//! assert_eq!("1.00 IN", segment.tags["MAX HAIL SIZE"]);
//!
//! // problems which affect only part of the product are
//! // reported as warnings
//! assert!(decoded.warnings.is_empty());
//! ```
//!
//! To change the time zone table, or to decode archived products
//! which lack an issuance line, create a [`Decoder`] with the
//! [`DecoderBuilder`].
//!
//! Some product types have fields of their own. These are decoded
//! by a [`SpecialProduct`] like the [`MesoscaleDiscussion`].
//!
//! ## Background
//!
//! Every product begins with a WMO abbreviated heading and an AWIPS
//! identifier, which together say who sent the product and what
//! kind of product it is. Most products then give a human-readable
//! issuance time in local time.
//!
//! Products which cover several areas are split into *segments*,
//! each terminated by `$$`. A segment may carry:
//!
//! * a [UGC](Ugc) string listing the counties or zones it covers,
//!   and when the segment expires;
//! * one or more [VTEC](Vtec) strings which track hazard events
//!   from issuance to cancellation;
//! * a [polygon](LatLon) and [storm motion](TimeMotLoc); and
//! * impact tags like `MAX HAIL SIZE...1.00 IN`.
//!
//! These encodings are described in NWS Directives 10-1701,
//! 10-1702, and 10-1703.
//!
//! ## Crate features
//!
//! * `serde`: derive `Serialize` for decoded products. If enabled,
//!   `serde` becomes part of this crate's public API.
//!

mod builder;
mod datetime;
mod header;
mod issued;
mod latlon;
mod product;
mod segment;
mod tags;
mod timezone;
mod ugc;

pub mod products;
pub mod vtec;

pub use builder::DecoderBuilder;
pub use datetime::InvalidDateErr;
pub use header::{parse_headers, AwipsHeader, HeaderError, WmoHeader};
pub use issued::{parse_issued, IssuedError};
pub use latlon::{LatLon, TimeMotLoc};
pub use product::{Decoded, Decoder, ProductError, Segment, TextProduct, Warning};
pub use products::{MesoscaleDiscussion, SpecialProduct};
pub use segment::{split_segments, MIN_SEGMENT_LEN, SEGMENT_TERMINATOR};
pub use tags::parse_tags;
pub use timezone::{NwsTimeZones, TimeZoneLookup};
pub use ugc::{Ugc, UgcCode, UgcError, UgcKind};
pub use vtec::{
    Action, Phenomena, ProductClass, Significance, Vtec, VtecError, VtecErrorKind, VtecErrors,
};
