//! VTEC action codes

use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;

/// VTEC action
///
/// Describes what the product does to the event: issue it,
/// continue it, extend it, cancel it, and so on. Defined in
/// NWS Directive 10-1703.
///
/// ```
/// use std::str::FromStr;
/// use awips::Action;
///
/// assert_eq!(Action::New, Action::from_str("NEW").unwrap());
/// assert_eq!("Extended in time", Action::ExtendedTime.as_display_str());
/// assert_eq!("EXT", format!("{:#}", Action::ExtendedTime));
/// assert!(Action::from_str("EX").is_err());
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
pub enum Action {
    /// New event
    #[strum(serialize = "NEW", detailed_message = "New")]
    New,

    /// Event continued
    #[strum(serialize = "CON", detailed_message = "Continued")]
    Continued,

    /// Event extended in time
    #[strum(serialize = "EXT", detailed_message = "Extended in time")]
    ExtendedTime,

    /// Event extended in area
    #[strum(serialize = "EXA", detailed_message = "Extended in area")]
    ExtendedArea,

    /// Event extended in both time and area
    #[strum(serialize = "EXB", detailed_message = "Extended in time and area")]
    ExtendedBoth,

    /// Event upgraded
    #[strum(serialize = "UPG", detailed_message = "Upgraded")]
    Upgraded,

    /// Event cancelled
    #[strum(serialize = "CAN", detailed_message = "Cancelled")]
    Cancelled,

    /// Event expired
    #[strum(serialize = "EXP", detailed_message = "Expired")]
    Expired,

    /// Correction to a previous product
    #[strum(serialize = "COR", detailed_message = "Correction")]
    Correction,

    /// Routine product
    #[strum(serialize = "ROU", detailed_message = "Routine")]
    Routine,
}

impl Action {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Three-character VTEC code
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// True if this action ends the event
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Expired | Self::Upgraded)
    }

    pub(crate) fn parse(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for Action {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`Continued`"
    /// * The alternate form is the three-character code like "`CON`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}
