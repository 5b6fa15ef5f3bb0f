//! Conversion from encoder pulses to carriage height.
//!
//! The count is first turned into a linear estimate from the home height, then a fixed quadratic
//! fitted against tape measurements corrects the residual error of the belt.

use num_traits::float::FloatCore;

/// `a·x² + b·x + c`, applied to the linear height estimate in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Correction {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Correction {
    pub const DEFAULT: Self = Self {
        a: 0.000_008_3,
        b: 1.028_227_4,
        c: -5.378_696_4,
    };

    pub const IDENTITY: Self = Self {
        a: 0.0,
        b: 1.0,
        c: 0.0,
    };

    pub fn apply(&self, x: f32) -> f32 {
        self.a * FloatCore::powi(x, 2) + self.b * x + self.c
    }
}

impl Default for Correction {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Height of the carriage at home, where the count is zero.
    pub baseline_mm: f32,
    pub pulses_per_mm: f32,
    pub correction: Correction,
}

impl Calibration {
    pub const DEFAULT: Self = Self::new(375.0, 197.0, Correction::DEFAULT);

    pub const fn new(baseline_mm: f32, pulses_per_mm: f32, correction: Correction) -> Self {
        Self {
            baseline_mm,
            pulses_per_mm,
            correction,
        }
    }

    pub fn linear_height(&self, pulses: i32) -> f32 {
        pulses as f32 / self.pulses_per_mm + self.baseline_mm
    }

    /// Corrected height in mm. Never fails, extreme counts simply give extreme heights.
    pub fn height(&self, pulses: i32) -> f32 {
        self.correction.apply(self.linear_height(pulses))
    }

    /// Pulses needed to reach a linear (uncorrected) height.
    pub fn pulses_for(&self, linear_mm: f32) -> f32 {
        (linear_mm - self.baseline_mm) * self.pulses_per_mm
    }

    /// Derive a new scale from a two point tape measurement.
    ///
    /// * `home_actual_mm` - tape height at home, becomes the new baseline
    /// * `reported_mm` - linear height this calibration reported after moving away from home
    /// * `actual_mm` - tape height at that same spot
    ///
    /// Returns `None` when the measured move is not upwards, the scale is undefined then.
    pub fn refit(&self, home_actual_mm: f32, reported_mm: f32, actual_mm: f32) -> Option<Self> {
        let displacement = actual_mm - home_actual_mm;
        if displacement.is_nan() || displacement <= 0.0 {
            return None;
        }

        let pulses = self.pulses_for(reported_mm);
        let pulses_per_mm = pulses / displacement;
        if !pulses_per_mm.is_finite() || pulses_per_mm <= 0.0 {
            return None;
        }

        log::info!(
            "refit: {} pulses over {} mm, scale {} -> {} pulses/mm",
            pulses,
            displacement,
            self.pulses_per_mm,
            pulses_per_mm
        );

        Some(Self::new(home_actual_mm, pulses_per_mm, self.correction))
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn zero_count_is_corrected_baseline() {
        let cal = Calibration::DEFAULT;
        let expected = 0.000_008_3 * 375.0 * 375.0 + 1.028_227_4 * 375.0 - 5.378_696_4;

        assert!(close(cal.linear_height(0), 375.0));
        assert!(close(cal.height(0), expected));
        assert!(close(cal.height(0), 381.3738));
    }

    #[test]
    fn linear_estimate_scales_by_pulses_per_mm() {
        let cal = Calibration::DEFAULT;

        assert!(close(cal.linear_height(197), 376.0));
        assert!(close(cal.linear_height(-197 * 100), 275.0));
        assert!(close(cal.pulses_for(376.0), 197.0));
    }

    #[test]
    fn identity_correction_keeps_linear_height() {
        let cal = Calibration::new(200.0, 50.0, Correction::IDENTITY);

        assert!(close(cal.height(5000), 300.0));
    }

    #[test]
    fn extreme_counts_still_produce_a_value() {
        let cal = Calibration::DEFAULT;

        assert!(cal.height(i32::MAX).is_finite());
        assert!(cal.height(i32::MIN).is_finite());
    }

    #[test]
    fn refit_recovers_true_scale() {
        // firmware thinks 50 pulses/mm, the belt really gives 100
        let cal = Calibration::new(375.0, 50.0, Correction::IDENTITY);
        let pulses = 40_000;
        let reported = cal.linear_height(pulses);

        let refit = cal.refit(380.0, reported, 780.0).unwrap();

        assert!(close(refit.pulses_per_mm, 100.0));
        assert!(close(refit.baseline_mm, 380.0));
        assert!(close(refit.linear_height(pulses), 780.0));
        assert_eq!(refit.correction, Correction::IDENTITY);
    }

    #[test]
    fn refit_needs_upward_move() {
        let cal = Calibration::DEFAULT;

        assert_eq!(cal.refit(400.0, 500.0, 400.0), None);
        assert_eq!(cal.refit(400.0, 500.0, 350.0), None);
        assert_eq!(cal.refit(400.0, 500.0, f32::NAN), None);
    }

    #[test]
    fn refit_rejects_move_reported_below_home() {
        let cal = Calibration::DEFAULT;

        assert_eq!(cal.refit(375.0, 300.0, 500.0), None);
    }
}
