//! Static bike catalog keyed by bike type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of minor currency units (cents) in one whole unit.
pub const MINOR_UNITS_PER_UNIT: i64 = 100;

/// Raised when a listing carries a bike type outside the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown bike type: {0}")]
pub struct UnknownBikeType(pub String);

/// The closed set of bike types a listing can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BikeType {
    Fixie,
    Hybrid,
    Road,
    Touring,
}

impl BikeType {
    pub const ALL: [BikeType; 4] = [
        BikeType::Fixie,
        BikeType::Hybrid,
        BikeType::Road,
        BikeType::Touring,
    ];

    /// Tag stored in the `listings.bike_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            BikeType::Fixie => "fixie",
            BikeType::Hybrid => "hybrid",
            BikeType::Road => "road",
            BikeType::Touring => "touring",
        }
    }

    /// Display name
    pub fn title(&self) -> &'static str {
        match self {
            BikeType::Fixie => "Panasonic Fixie",
            BikeType::Hybrid => "Cozmic CX 1.0",
            BikeType::Road => "Myata Vintage Road Bike",
            BikeType::Touring => "Roberts Cycles Clubman",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BikeType::Fixie => concat!(
                "Early 80's panasonic 10spd frame with a nice new chrome fork, ",
                "aluminum bars, nice aluminum stem, weinman singlespeed/fixed ",
                "wheel set (velocity style rims)."
            ),
            BikeType::Hybrid => concat!(
                "The Cozmic CX 1.0 features a butted frame (reduces weight) ",
                "combined with hydraulic brakes to give amazing stopping power ",
                "with light feel. The forks feature lock out and pre load ",
                "adjustment-useful if you are riding along the road to work, ",
                "or to the race."
            ),
            BikeType::Road => concat!(
                "This 12-speed Miyata 512 is built on a lugged, triple-butted, ",
                "CroMo frame. A solid ride with a tight race geometry to keep ",
                "it quick and easy to handle."
            ),
            BikeType::Touring => concat!(
                "The Clubman is tough enough, yet comfortable enough for ",
                "regular commuting. The tubing is slightly heavier-duty than ",
                "the Audax to take larger panniers. Tubing is Reynolds 853 & ",
                "725 with 531 Forks."
            ),
        }
    }

    /// Rental price in whole currency units
    pub fn price(&self) -> i64 {
        match self {
            BikeType::Fixie => 15,
            BikeType::Hybrid => 18,
            BikeType::Road => 12,
            BikeType::Touring => 10,
        }
    }

    /// Rental price as sent to the payments API (cents)
    pub fn price_minor_units(&self) -> i64 {
        self.price() * MINOR_UNITS_PER_UNIT
    }
}

impl FromStr for BikeType {
    type Err = UnknownBikeType;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "fixie" => Ok(BikeType::Fixie),
            "hybrid" => Ok(BikeType::Hybrid),
            "road" => Ok(BikeType::Road),
            "touring" => Ok(BikeType::Touring),
            other => Err(UnknownBikeType(other.to_string())),
        }
    }
}

impl fmt::Display for BikeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices() {
        assert_eq!(BikeType::Fixie.price(), 15);
        assert_eq!(BikeType::Hybrid.price(), 18);
        assert_eq!(BikeType::Road.price(), 12);
        assert_eq!(BikeType::Touring.price(), 10);
    }

    #[test]
    fn test_minor_units_multiply_by_one_hundred() {
        assert_eq!(BikeType::Fixie.price_minor_units(), 1500);
        assert_eq!(BikeType::Touring.price_minor_units(), 1000);
    }

    #[test]
    fn test_titles() {
        assert_eq!(BikeType::Fixie.title(), "Panasonic Fixie");
        assert_eq!(BikeType::Hybrid.title(), "Cozmic CX 1.0");
        assert_eq!(BikeType::Road.title(), "Myata Vintage Road Bike");
        assert_eq!(BikeType::Touring.title(), "Roberts Cycles Clubman");
    }

    #[test]
    fn test_descriptions_are_joined_without_gaps() {
        assert!(
            BikeType::Road
                .description()
                .starts_with("This 12-speed Miyata 512 is built on a lugged, triple-butted, CroMo frame.")
        );
        assert!(BikeType::Touring.description().ends_with("725 with 531 Forks."));
        for bike_type in BikeType::ALL {
            assert!(!bike_type.description().contains("  "));
        }
    }

    #[test]
    fn test_parse_round_trips_tag() {
        for bike_type in BikeType::ALL {
            assert_eq!(bike_type.as_str().parse::<BikeType>(), Ok(bike_type));
        }
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(
            "tandem".parse::<BikeType>(),
            Err(UnknownBikeType("tandem".to_string()))
        );
        // Tags are case sensitive
        assert!("Road".parse::<BikeType>().is_err());
    }
}
