//! Shift-aware well allocation
//!
//! Maps (category, shift) to the half-open range of well indices valid for
//! that pairing. Patient, equipment, and surface plates are shared across
//! shifts; doctor and nurse wells are partitioned into per-shift blocks so
//! each shift's staff carry their own contamination state.

use serde::{Deserialize, Serialize};

use crate::types::{Category, SimulationConfig};

/// A half-open `[start, end)` interval of well indices on one plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellRange {
    /// First valid well index
    pub start: usize,
    /// One past the last valid well index
    pub end: usize,
}

impl WellRange {
    /// Create a new range. Callers are expected to keep `end > start`;
    /// [`PlateLayout`] always does.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of wells in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `well` falls inside the range.
    pub fn contains(&self, well: usize) -> bool {
        (self.start..self.end).contains(&well)
    }

    /// Iterate over the well indices in the range.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.start..self.end
    }
}

/// Pure allocator from (category, shift position) to well ranges.
///
/// Shift position is the index into the configured shift list; the same
/// shift name at a different position yields a different staff block, which
/// is exactly why shift order is part of the allocation contract.
#[derive(Debug, Clone, Copy)]
pub struct PlateLayout {
    doctor_wells_per_shift: usize,
    nurse_wells_per_shift: usize,
    patient_well_count: usize,
    equipment_well_count: usize,
    surface_well_count: usize,
}

impl PlateLayout {
    /// Build the layout from the configured well counts.
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            doctor_wells_per_shift: config.doctor_wells_per_shift,
            nurse_wells_per_shift: config.nurse_wells_per_shift,
            patient_well_count: config.patient_well_count,
            equipment_well_count: config.equipment_well_count,
            surface_well_count: config.surface_well_count,
        }
    }

    /// The well range addressable for `category` during the shift at
    /// `shift_index`.
    ///
    /// Doctor and nurse blocks for one shift are laid out back to back:
    /// `[doctor block][nurse block]`, repeated per shift. The remaining
    /// categories ignore the shift entirely.
    pub fn range_for(&self, category: Category, shift_index: usize) -> WellRange {
        let staff_block = self.doctor_wells_per_shift + self.nurse_wells_per_shift;
        match category {
            Category::Patient => WellRange::new(0, self.patient_well_count),
            Category::Doctor => {
                let start = staff_block * shift_index;
                WellRange::new(start, start + self.doctor_wells_per_shift)
            }
            Category::Nurse => {
                let start = staff_block * shift_index + self.doctor_wells_per_shift;
                WellRange::new(start, start + self.nurse_wells_per_shift)
            }
            Category::Equipment => WellRange::new(0, self.equipment_well_count),
            Category::Surface => WellRange::new(0, self.surface_well_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationConfig;

    fn default_layout() -> PlateLayout {
        PlateLayout::new(&SimulationConfig::default())
    }

    #[test]
    fn test_ranges_are_non_empty() {
        let layout = default_layout();
        for category in Category::ALL {
            for shift_index in 0..3 {
                let range = layout.range_for(category, shift_index);
                assert!(range.end > range.start, "{category} shift {shift_index}");
                assert!(!range.is_empty());
            }
        }
    }

    #[test]
    fn test_shared_plates_ignore_shift() {
        let layout = default_layout();
        for category in [Category::Patient, Category::Equipment, Category::Surface] {
            let base = layout.range_for(category, 0);
            for shift_index in 1..3 {
                assert_eq!(layout.range_for(category, shift_index), base);
            }
        }
        assert_eq!(layout.range_for(Category::Patient, 0), WellRange::new(0, 20));
        assert_eq!(layout.range_for(Category::Surface, 0), WellRange::new(0, 60));
    }

    #[test]
    fn test_staff_block_offsets() {
        let layout = default_layout();

        // block size 6 + 12 = 18 per shift
        assert_eq!(layout.range_for(Category::Doctor, 0), WellRange::new(0, 6));
        assert_eq!(layout.range_for(Category::Nurse, 0), WellRange::new(6, 18));
        assert_eq!(layout.range_for(Category::Doctor, 1), WellRange::new(18, 24));
        assert_eq!(layout.range_for(Category::Nurse, 1), WellRange::new(24, 36));
        assert_eq!(layout.range_for(Category::Doctor, 2), WellRange::new(36, 42));
        assert_eq!(layout.range_for(Category::Nurse, 2), WellRange::new(42, 54));
    }

    #[test]
    fn test_staff_ranges_disjoint_within_shift() {
        let layout = default_layout();
        for shift_index in 0..3 {
            let doctor = layout.range_for(Category::Doctor, shift_index);
            let nurse = layout.range_for(Category::Nurse, shift_index);

            assert!(doctor.end <= nurse.start || nurse.end <= doctor.start);
            assert_eq!(doctor.len() + nurse.len(), 18);
        }
    }

    #[test]
    fn test_range_helpers() {
        let range = WellRange::new(6, 18);
        assert_eq!(range.len(), 12);
        assert!(range.contains(6));
        assert!(range.contains(17));
        assert!(!range.contains(18));
        assert_eq!(range.iter().count(), 12);
    }
}
