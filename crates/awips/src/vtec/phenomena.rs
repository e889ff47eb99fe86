//! VTEC phenomena codes

use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;

/// VTEC phenomena
///
/// A two-character code for the weather or hydrologic event.
/// Codes are listed in NWS Directive 10-1703. Some codes are
/// only ever paired with particular
/// [significance](crate::Significance) levels.
///
/// ```
/// use std::str::FromStr;
/// use awips::Phenomena;
///
/// assert_eq!(Phenomena::Gale, Phenomena::from_str("GL").unwrap());
/// assert_eq!("Severe Thunderstorm", format!("{}", Phenomena::SevereThunderstorm));
/// assert_eq!("SV", format!("{:#}", Phenomena::SevereThunderstorm));
/// assert!(Phenomena::from_str("QQ").is_err());
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
#[non_exhaustive]
pub enum Phenomena {
    #[strum(serialize = "AF", detailed_message = "Ashfall")]
    Ashfall,
    #[strum(serialize = "AS", detailed_message = "Air Stagnation")]
    AirStagnation,
    #[strum(serialize = "BH", detailed_message = "Beach Hazard")]
    BeachHazard,
    #[strum(serialize = "BS", detailed_message = "Blowing Snow")]
    BlowingSnow,
    #[strum(serialize = "BW", detailed_message = "Brisk Wind")]
    BriskWind,
    #[strum(serialize = "BZ", detailed_message = "Blizzard")]
    Blizzard,
    #[strum(serialize = "CF", detailed_message = "Coastal Flood")]
    CoastalFlood,
    #[strum(serialize = "CW", detailed_message = "Cold Weather")]
    ColdWeather,
    #[strum(serialize = "DF", detailed_message = "Debris Flow")]
    DebrisFlow,
    #[strum(serialize = "DS", detailed_message = "Dust Storm")]
    DustStorm,
    #[strum(serialize = "DU", detailed_message = "Blowing Dust")]
    BlowingDust,
    #[strum(serialize = "EC", detailed_message = "Extreme Cold")]
    ExtremeCold,
    #[strum(serialize = "EH", detailed_message = "Excessive Heat")]
    ExcessiveHeat,
    #[strum(serialize = "EW", detailed_message = "Extreme Wind")]
    ExtremeWind,
    #[strum(serialize = "FA", detailed_message = "Areal Flood")]
    ArealFlood,
    #[strum(serialize = "FF", detailed_message = "Flash Flood")]
    FlashFlood,
    #[strum(serialize = "FG", detailed_message = "Dense Fog")]
    DenseFog,
    #[strum(serialize = "FL", detailed_message = "Flood")]
    Flood,
    #[strum(serialize = "FR", detailed_message = "Frost")]
    Frost,
    #[strum(serialize = "FW", detailed_message = "Fire Weather")]
    FireWeather,
    #[strum(serialize = "FZ", detailed_message = "Freeze")]
    Freeze,
    #[strum(serialize = "GL", detailed_message = "Gale")]
    Gale,
    #[strum(serialize = "HF", detailed_message = "Hurricane Force Wind")]
    HurricaneForceWind,
    #[strum(serialize = "HI", detailed_message = "Inland Hurricane")]
    InlandHurricane,
    #[strum(serialize = "HS", detailed_message = "Heavy Snow")]
    HeavySnow,
    #[strum(serialize = "HT", detailed_message = "Heat")]
    Heat,
    #[strum(serialize = "HU", detailed_message = "Hurricane")]
    Hurricane,
    #[strum(serialize = "HW", detailed_message = "High Wind")]
    HighWind,
    #[strum(serialize = "HY", detailed_message = "Hydrologic")]
    Hydrologic,
    #[strum(serialize = "HZ", detailed_message = "Hard Freeze")]
    HardFreeze,
    #[strum(serialize = "IP", detailed_message = "Sleet")]
    Sleet,
    #[strum(serialize = "IS", detailed_message = "Ice Storm")]
    IceStorm,
    #[strum(serialize = "LB", detailed_message = "Lake Effect Snow and Blowing Snow")]
    LakeEffectSnowAndBlowingSnow,
    #[strum(serialize = "LE", detailed_message = "Lake Effect Snow")]
    LakeEffectSnow,
    #[strum(serialize = "LO", detailed_message = "Low Water")]
    LowWater,
    #[strum(serialize = "LS", detailed_message = "Lakeshore Flood")]
    LakeshoreFlood,
    #[strum(serialize = "LW", detailed_message = "Lake Wind")]
    LakeWind,
    #[strum(serialize = "MA", detailed_message = "Marine")]
    Marine,
    #[strum(serialize = "MF", detailed_message = "Marine Dense Fog")]
    MarineDenseFog,
    #[strum(serialize = "MH", detailed_message = "Marine Ashfall")]
    MarineAshfall,
    #[strum(serialize = "MS", detailed_message = "Marine Dense Smoke")]
    MarineDenseSmoke,
    #[strum(serialize = "RB", detailed_message = "Small Craft for Rough Bar")]
    SmallCraftRoughBar,
    #[strum(serialize = "RP", detailed_message = "Rip Current Risk")]
    RipCurrentRisk,
    #[strum(serialize = "SB", detailed_message = "Snow and Blowing Snow")]
    SnowAndBlowingSnow,
    #[strum(serialize = "SC", detailed_message = "Small Craft")]
    SmallCraft,
    #[strum(serialize = "SE", detailed_message = "Hazardous Seas")]
    HazardousSeas,
    #[strum(serialize = "SI", detailed_message = "Small Craft for Winds")]
    SmallCraftWinds,
    #[strum(serialize = "SM", detailed_message = "Dense Smoke")]
    DenseSmoke,
    #[strum(serialize = "SN", detailed_message = "Snow")]
    Snow,
    #[strum(serialize = "SQ", detailed_message = "Snow Squall")]
    SnowSquall,
    #[strum(serialize = "SR", detailed_message = "Storm")]
    Storm,
    #[strum(serialize = "SS", detailed_message = "Storm Surge")]
    StormSurge,
    #[strum(serialize = "SU", detailed_message = "High Surf")]
    HighSurf,
    #[strum(serialize = "SV", detailed_message = "Severe Thunderstorm")]
    SevereThunderstorm,
    #[strum(serialize = "SW", detailed_message = "Small Craft for Hazardous Seas")]
    SmallCraftHazardousSeas,
    #[strum(serialize = "TI", detailed_message = "Inland Tropical Storm")]
    InlandTropicalStorm,
    #[strum(serialize = "TO", detailed_message = "Tornado")]
    Tornado,
    #[strum(serialize = "TR", detailed_message = "Tropical Storm")]
    TropicalStorm,
    #[strum(serialize = "TS", detailed_message = "Tsunami")]
    Tsunami,
    #[strum(serialize = "TY", detailed_message = "Typhoon")]
    Typhoon,
    #[strum(serialize = "UP", detailed_message = "Heavy Freezing Spray")]
    HeavyFreezingSpray,
    #[strum(serialize = "WC", detailed_message = "Wind Chill")]
    WindChill,
    #[strum(serialize = "WI", detailed_message = "Wind")]
    Wind,
    #[strum(serialize = "WS", detailed_message = "Winter Storm")]
    WinterStorm,
    #[strum(serialize = "WW", detailed_message = "Winter Weather")]
    WinterWeather,
    #[strum(serialize = "XH", detailed_message = "Extreme Heat")]
    ExtremeHeat,
    #[strum(serialize = "ZF", detailed_message = "Freezing Fog")]
    FreezingFog,
    #[strum(serialize = "ZR", detailed_message = "Freezing Rain")]
    FreezingRain,
    #[strum(serialize = "ZY", detailed_message = "Freezing Spray")]
    FreezingSpray,
}

impl Phenomena {
    /// Human-readable string representation
    ///
    /// Converts to a human-readable string, like "`Flash Flood`."
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Two-character VTEC code
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// True for tropical cyclone hazards
    ///
    /// Tropical events are numbered nationally rather than by
    /// each office.
    pub fn is_tropical(&self) -> bool {
        matches!(
            self,
            Self::Hurricane
                | Self::InlandHurricane
                | Self::TropicalStorm
                | Self::InlandTropicalStorm
                | Self::Typhoon
                | Self::StormSurge
        )
    }

    pub(crate) fn parse(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }
}

impl AsRef<str> for Phenomena {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for Phenomena {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`Gale`"
    /// * The alternate form is the two-character code like "`GL`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_phenomena_completeness() {
        let mut code_set = std::collections::HashSet::new();
        let mut name_set = std::collections::HashSet::new();

        for phen in Phenomena::iter() {
            // codes and names are unique
            let code: &str = phen.into();
            assert_eq!(code.len(), 2);
            assert!(code_set.insert(code.to_owned()));
            assert!(name_set.insert(phen.as_display_str()));

            // back-convert
            assert_eq!(Phenomena::from_str(code).unwrap(), phen);
        }
    }
}
