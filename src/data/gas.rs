//! The fixed gas vocabulary and the validated gas pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

/// One of the ten gases the dataset is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gas {
    CarbonDioxide,
    Nitrogen,
    Methane,
    Ethane,
    Ethene,
    Acetylene,
    Propane,
    Propene,
    Butane,
    Isobutane,
}

impl Gas {
    /// All gases in display order (combo-box order).
    pub const ALL: [Gas; 10] = [
        Gas::CarbonDioxide,
        Gas::Nitrogen,
        Gas::Methane,
        Gas::Ethane,
        Gas::Ethene,
        Gas::Acetylene,
        Gas::Propane,
        Gas::Propene,
        Gas::Butane,
        Gas::Isobutane,
    ];

    /// Name as used for dataset keys and labels.
    pub fn name(self) -> &'static str {
        match self {
            Gas::CarbonDioxide => "carbon dioxide",
            Gas::Nitrogen => "nitrogen",
            Gas::Methane => "methane",
            Gas::Ethane => "ethane",
            Gas::Ethene => "ethene",
            Gas::Acetylene => "acetylene",
            Gas::Propane => "propane",
            Gas::Propene => "propene",
            Gas::Butane => "butane",
            Gas::Isobutane => "isobutane",
        }
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gas {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Gas::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExplorerError::UnknownGas(s.to_string()))
    }
}

impl TryFrom<String> for Gas {
    type Error = ExplorerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Gas> for String {
    fn from(g: Gas) -> Self {
        g.name().to_string()
    }
}

/// Which side of the pair a value belongs to (x axis = gas 1, y axis = gas 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasSlot {
    First,
    Second,
}

impl GasSlot {
    pub const BOTH: [GasSlot; 2] = [GasSlot::First, GasSlot::Second];

    pub fn index(self) -> usize {
        match self {
            GasSlot::First => 0,
            GasSlot::Second => 1,
        }
    }
}

/// Two distinct gases compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPair {
    first: Gas,
    second: Gas,
}

impl GasPair {
    /// Build a pair, rejecting a self-comparison.
    pub fn new(first: Gas, second: Gas) -> Result<Self> {
        if first == second {
            return Err(ExplorerError::SameGas(first));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> Gas {
        self.first
    }

    pub fn second(&self) -> Gas {
        self.second
    }

    pub fn get(&self, slot: GasSlot) -> Gas {
        match slot {
            GasSlot::First => self.first,
            GasSlot::Second => self.second,
        }
    }
}

impl Default for GasPair {
    fn default() -> Self {
        Self {
            first: Gas::CarbonDioxide,
            second: Gas::Nitrogen,
        }
    }
}
