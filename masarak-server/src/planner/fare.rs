//! Fare policies.
//!
//! The fare rule in force varies by operator decree, so it is a named
//! configuration value, not a constant in the cost model.

/// How a trip's fare is computed from its boardings, in Syrian pounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarePolicy {
    /// One flat fare covers the whole trip, transfers included.
    FreeTransfers { fare: u32 },

    /// Every boarding pays the flat fare.
    FlatPerBoarding { fare: u32 },

    /// Every boarding pays the flat fare, plus a surcharge per transfer.
    TransferSurcharge { fare: u32, surcharge: u32 },
}

impl FarePolicy {
    /// Total fare for a trip with the given number of boardings.
    ///
    /// `boardings` is at least 1 (a trip rides at least one route).
    pub fn trip_fare(&self, boardings: u32) -> u32 {
        let boardings = boardings.max(1);
        match self {
            FarePolicy::FreeTransfers { fare } => *fare,
            FarePolicy::FlatPerBoarding { fare } => fare * boardings,
            FarePolicy::TransferSurcharge { fare, surcharge } => {
                fare * boardings + surcharge * (boardings - 1)
            }
        }
    }
}

impl Default for FarePolicy {
    /// The fare rule observed on the Damascus network: 2500 SYP per
    /// boarding plus 500 per transfer (a one-transfer trip costs 5500).
    fn default() -> Self {
        FarePolicy::TransferSurcharge {
            fare: 2500,
            surcharge: 500,
        }
    }
}
