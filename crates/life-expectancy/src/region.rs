//! Closed set of Eurostat region codes.
//!
//! The set mixes actual countries with aggregate groupings (EU27, euro area,
//! EFTA, ...). Aggregates are valid filters but are excluded from
//! [`Region::actual_countries`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LifeExpectancyError, Result};

macro_rules! regions {
    ($($variant:ident),+ $(,)?) => {
        /// A region code present in the life expectancy dataset.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[allow(non_camel_case_types)]
        pub enum Region {
            $($variant,)+
        }

        impl Region {
            /// Every region, in declaration order.
            pub const ALL: &'static [Region] = &[$(Region::$variant,)+];

            /// The region code as it appears in the dataset.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Region::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

regions!(
    AT, BE, BG, CH, CY, CZ, DK, EE, EL, ES, EU27_2020, FI, FR, HR, HU, IS, IT, LI, LT, LU, LV, MT,
    NL, NO, PL, PT, RO, SE, SI, SK, DE, DE_TOT, AL, EA18, EA19, EFTA, IE, ME, MK, RS, AM, AZ, GE,
    TR, UA, BY, EEA30_2007, EEA31, EU27_2007, EU28, UK, XK, FX, MD, SM, RU,
);

impl Region {
    /// Look up a region by its exact (case-sensitive) code.
    pub fn get(code: &str) -> Result<Region> {
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.as_str() == code)
            .ok_or_else(|| LifeExpectancyError::InvalidRegion(code.to_string()))
    }

    /// Returns true for groupings that are not a single country.
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Region::EU27_2020
                | Region::DE_TOT
                | Region::EA18
                | Region::EA19
                | Region::EFTA
                | Region::EEA30_2007
                | Region::EEA31
                | Region::EU27_2007
                | Region::EU28
        )
    }

    /// Regions that are actual countries, in declaration order.
    pub fn actual_countries() -> Vec<Region> {
        Region::ALL
            .iter()
            .copied()
            .filter(|region| !region.is_aggregate())
            .collect()
    }

    /// Lowercased code, as used in output file names.
    pub fn file_stem(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = LifeExpectancyError;

    fn from_str(s: &str) -> Result<Self> {
        Region::get(s)
    }
}
