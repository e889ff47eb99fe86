//! Product class

use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;

/// VTEC product class
///
/// The first field of a P-VTEC string. Identifies whether
/// the product is operational or a test.
///
/// ```
/// use std::str::FromStr;
/// use awips::ProductClass;
///
/// assert_eq!(ProductClass::Operational, ProductClass::from_str("O").unwrap());
/// assert_eq!("Test", ProductClass::Test.as_display_str());
/// assert_eq!("T", format!("{:#}", ProductClass::Test));
/// assert!(ProductClass::from_str("L").is_err());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(into = "&'static str"))]
pub enum ProductClass {
    /// Operational product
    #[strum(serialize = "O", detailed_message = "Operational")]
    Operational,

    /// Test product
    ///
    /// Test products must never be acted upon.
    #[strum(serialize = "T", detailed_message = "Test")]
    Test,

    /// Experimental product
    #[strum(serialize = "E", detailed_message = "Experimental")]
    Experimental,

    /// Experimental VTEC in an operational product
    #[strum(serialize = "X", detailed_message = "Experimental VTEC")]
    ExperimentalVtec,
}

impl ProductClass {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// One-character VTEC code
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// True if the product may be acted upon
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Operational)
    }

    pub(crate) fn parse(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }
}

impl AsRef<str> for ProductClass {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for ProductClass {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`Operational`"
    /// * The alternate form is the one-character code like "`O`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}
