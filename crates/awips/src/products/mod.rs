//! Decoders for specific product types
//!
//! Some products carry fields which only make sense for that
//! product type. A [`SpecialProduct`] decodes them directly from
//! the product text, independent of the segment-oriented
//! [`Decoder`](crate::Decoder).

mod mcd;

pub use mcd::{McdError, McdField, MesoscaleDiscussion};

use crate::header::AwipsHeader;
use crate::product::Decoder;

/// A product type with its own decoder
pub trait SpecialProduct: Sized {
    /// AWIPS identifier of this product type, like `SWOMCD`
    const AWIPS_ID: &'static str;

    /// Error decoding this product type
    type Error: std::error::Error;

    /// Does this decoder handle the given product?
    fn applies_to(awips: &AwipsHeader) -> bool {
        awips.original == Self::AWIPS_ID
    }

    /// Decode the product text
    ///
    /// The `decoder` supplies the time zone table and fallback
    /// issuance time.
    fn decode(text: &str, decoder: &Decoder) -> Result<Self, Self::Error>;
}
