//! Significance

use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;

/// VTEC significance
///
/// Combined with the [`Phenomena`](crate::Phenomena), the
/// significance identifies the hazard: `TO` + `W` is a
/// Tornado Warning.
///
/// | Code | Significance                                    |
/// |------|-------------------------------------------------|
/// | `W`  | [warning](crate::Significance::Warning)         |
/// | `A`  | [watch](crate::Significance::Watch)             |
/// | `Y`  | [advisory](crate::Significance::Advisory)       |
/// | `S`  | [statement](crate::Significance::Statement)     |
/// | `F`  | [forecast](crate::Significance::Forecast)       |
/// | `O`  | [outlook](crate::Significance::Outlook)         |
///
/// ```
/// use std::str::FromStr;
/// use awips::Significance;
///
/// assert_eq!(Significance::Watch, Significance::from_str("A").unwrap());
/// assert_eq!("Advisory", format!("{}", Significance::Advisory));
/// assert_eq!("Y", format!("{:#}", Significance::Advisory));
/// assert!(Significance::from_str("T").is_err());
/// ```
///
/// Significance levels are `Ord`, from least to most urgent.
///
/// ```
/// # use awips::Significance;
/// assert!(Significance::Advisory < Significance::Watch);
/// assert!(Significance::Watch < Significance::Warning);
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(into = "&'static str"))]
#[repr(u8)]
pub enum Significance {
    /// Outlook
    ///
    /// A hazardous event may develop, but well beyond the
    /// period covered by watches.
    #[strum(serialize = "O", detailed_message = "Outlook")]
    Outlook,

    /// Forecast
    #[strum(serialize = "F", detailed_message = "Forecast")]
    Forecast,

    /// Statement
    ///
    /// Follow-up information on an ongoing event.
    #[strum(serialize = "S", detailed_message = "Statement")]
    Statement,

    /// Advisory
    ///
    /// A less serious event which may still cause significant
    /// inconvenience.
    #[strum(serialize = "Y", detailed_message = "Advisory")]
    Advisory,

    /// Watch
    ///
    /// Conditions are favorable for a hazardous event, but its
    /// occurrence, location, or timing is still uncertain.
    #[strum(serialize = "A", detailed_message = "Watch")]
    Watch,

    /// Warning
    ///
    /// A hazardous event is occurring, imminent, or likely.
    #[strum(serialize = "W", detailed_message = "Warning")]
    Warning,
}

impl Significance {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// One-character VTEC code
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    pub(crate) fn parse(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }
}

impl AsRef<str> for Significance {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for Significance {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`Warning`"
    /// * The alternate form is the one-character code like "`W`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}
