use crate::calibration::Calibration;
use crate::motor::DutyRange;

/// Heights the carriage can physically reach, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Travel {
    pub min_mm: f32,
    pub max_mm: f32,
}

impl Travel {
    pub const DEFAULT: Self = Self {
        min_mm: 200.0,
        max_mm: 1700.0,
    };

    pub fn contains(&self, height_mm: f32) -> bool {
        (self.min_mm..=self.max_mm).contains(&height_mm)
    }
}

impl Default for Travel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LiftConfig {
    pub duty: DutyRange,
    pub calibration: Calibration,
    pub travel: Travel,
}

impl LiftConfig {
    pub const DEFAULT: Self = Self {
        duty: DutyRange::DEFAULT,
        calibration: Calibration::DEFAULT,
        travel: Travel::DEFAULT,
    };
}
