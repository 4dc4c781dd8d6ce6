//! Enumeration types for the contact schedule generator
//!
//! This module contains the entity categories, duty shifts, and the
//! (source, target) pair type used to key the interaction probability table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five simulated entity kinds, each backed by its own well plate
/// (doctor and nurse share the "staff" plate downstream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Patient beds
    Patient,
    /// Doctors on duty
    Doctor,
    /// Nurses on duty
    Nurse,
    /// Shared medical equipment
    Equipment,
    /// Environmental surfaces (door handles, rails, counters)
    Surface,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Patient,
        Category::Doctor,
        Category::Nurse,
        Category::Equipment,
        Category::Surface,
    ];

    /// Categories whose wells are cleaned at the end of every shift.
    pub const STAFF: [Category; 2] = [Category::Doctor, Category::Nurse];

    /// Categories whose wells are cleaned once at the end of every day.
    pub const END_OF_DAY_CLEANED: [Category; 2] = [Category::Equipment, Category::Surface];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Patient => write!(f, "patient"),
            Category::Doctor => write!(f, "doctor"),
            Category::Nurse => write!(f, "nurse"),
            Category::Equipment => write!(f, "equipment"),
            Category::Surface => write!(f, "surface"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(Category::Patient),
            "doctor" => Ok(Category::Doctor),
            "nurse" => Ok(Category::Nurse),
            "equipment" => Ok(Category::Equipment),
            "surface" => Ok(Category::Surface),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Recurring duty periods within a day.
///
/// The order in which shifts appear in the configured shift list is
/// significant: staff well blocks are allocated by shift position, so
/// reordering the list changes the entire allocation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    /// First duty period of the day
    Morning,
    /// Second duty period of the day
    Afternoon,
    /// Final duty period of the day
    Night,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => write!(f, "morning"),
            Shift::Afternoon => write!(f, "afternoon"),
            Shift::Night => write!(f, "night"),
        }
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "afternoon" => Ok(Shift::Afternoon),
            "night" => Ok(Shift::Night),
            _ => Err(format!("Unknown shift: {}", s)),
        }
    }
}

/// A directed (source, target) category pair.
///
/// Probability tables are keyed by pairs constructed once at load time, so
/// no string splitting happens during sampling. The textual form used in
/// configuration files is `source_target`, e.g. `nurse_patient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryPair {
    /// Category the transfer originates from
    pub source: Category,
    /// Category the transfer lands on
    pub target: Category,
}

impl CategoryPair {
    /// Create a pair from source and target categories.
    pub fn new(source: Category, target: Category) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for CategoryPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.source, self.target)
    }
}

impl FromStr for CategoryPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('_');
        let (source, target) = match (parts.next(), parts.next(), parts.next()) {
            (Some(source), Some(target), None) => (source, target),
            _ => return Err(format!("Pair key must be 'source_target', got: {}", s)),
        };
        Ok(Self { source: source.parse()?, target: target.parse()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display_round_trip() {
        for category in Category::ALL {
            let text = category.to_string();
            assert_eq!(text.parse::<Category>().unwrap(), category);
        }
        assert!("visitor".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_names() {
        assert_eq!(serde_json::to_string(&Category::Patient).unwrap(), "\"patient\"");
        assert_eq!(serde_json::to_string(&Category::Surface).unwrap(), "\"surface\"");
        let parsed: Category = serde_json::from_str("\"nurse\"").unwrap();
        assert_eq!(parsed, Category::Nurse);
    }

    #[test]
    fn test_shift_display_and_serde() {
        assert_eq!(Shift::Morning.to_string(), "morning");
        assert_eq!("night".parse::<Shift>().unwrap(), Shift::Night);
        assert_eq!(serde_json::to_string(&Shift::Afternoon).unwrap(), "\"afternoon\"");
        assert!("noon".parse::<Shift>().is_err());
    }

    #[test]
    fn test_category_pair_parsing() {
        let pair: CategoryPair = "nurse_patient".parse().unwrap();
        assert_eq!(pair.source, Category::Nurse);
        assert_eq!(pair.target, Category::Patient);
        assert_eq!(pair.to_string(), "nurse_patient");

        // self-pairs are legal
        let pair: CategoryPair = "surface_surface".parse().unwrap();
        assert_eq!(pair.source, pair.target);
    }

    #[test]
    fn test_category_pair_rejects_malformed_keys() {
        assert!("nurse".parse::<CategoryPair>().is_err());
        assert!("nurse_patient_doctor".parse::<CategoryPair>().is_err());
        assert!("nurse_visitor".parse::<CategoryPair>().is_err());
        assert!("_patient".parse::<CategoryPair>().is_err());
    }
}
