pub mod hbridge;

use core::fmt;

/// Largest speed magnitude accepted by [`MotorEffort::from_speed`], in percent.
pub const MAX_SPEED: u8 = 100;

/// Duty values are expressed on the 10 bit scale the lift was tuned with.
pub const DUTY_RESOLUTION: u16 = 1023;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorEffort {
    Forward(u8), // Measured as 1..=100 percent
    Backward(u8),
    #[default]
    Release,
}

impl MotorEffort {
    /// Signed speed in percent. Anything outside of -100..=100 releases the motor.
    pub fn from_speed(speed: i16) -> Self {
        let magnitude = speed.unsigned_abs();
        if magnitude > MAX_SPEED as u16 {
            log::debug!("speed {} out of range, releasing", speed);
            return MotorEffort::Release;
        }
        if speed == 0 {
            return MotorEffort::Release;
        }

        if speed > 0 {
            MotorEffort::Forward(magnitude as u8)
        } else {
            MotorEffort::Backward(magnitude as u8)
        }
    }

    pub fn is_released(&self) -> bool {
        *self == MotorEffort::Release
    }
}

/// Duty applied to each bridge input, on the [`DUTY_RESOLUTION`] scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelDuty {
    pub input_1: u16,
    pub input_2: u16,
}

/// Band of duty the motor is driven in once it is asked to move at all.
/// Below `min` the gearbox stalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyRange {
    pub min: u16,
    pub max: u16,
}

impl DutyRange {
    pub const DEFAULT: Self = Self { min: 600, max: 1023 };

    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Linear map of `percent` from 0..=100 onto `min..=max`, truncating.
    pub fn scale(&self, percent: u8) -> u16 {
        let percent = percent.min(MAX_SPEED) as i32;
        let span = self.max as i32 - self.min as i32;
        (self.min as i32 + percent * span / MAX_SPEED as i32) as u16
    }

    pub fn channels(&self, effort: MotorEffort) -> ChannelDuty {
        match effort {
            MotorEffort::Forward(p) => ChannelDuty {
                input_1: self.scale(p),
                input_2: 0,
            },
            MotorEffort::Backward(p) => ChannelDuty {
                input_1: 0,
                input_2: self.scale(p),
            },
            MotorEffort::Release => ChannelDuty::default(),
        }
    }
}

impl Default for DutyRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Failure reported by one of the two PWM inputs of a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveError<A, B> {
    Input1(A),
    Input2(B),
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Display for DriveError<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::Input1(e) => write!(f, "pwm input 1 failed: {:?}", e),
            DriveError::Input2(e) => write!(f, "pwm input 2 failed: {:?}", e),
        }
    }
}

pub trait OpenLoopDrive {
    type Error;

    fn drive(&mut self, effort: MotorEffort) -> Result<(), Self::Error>;
    fn current_effort(&self) -> MotorEffort;

    /// Signed speed in percent, positive raises the carriage.
    fn set_speed(&mut self, speed: i16) -> Result<(), Self::Error> {
        self.drive(MotorEffort::from_speed(speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_zero_and_out_of_range_release() {
        for speed in [0, 101, -101, 1000, i16::MAX, i16::MIN] {
            assert_eq!(MotorEffort::from_speed(speed), MotorEffort::Release, "{}", speed);
        }
    }

    #[test]
    fn speed_sign_picks_direction() {
        assert_eq!(MotorEffort::from_speed(1), MotorEffort::Forward(1));
        assert_eq!(MotorEffort::from_speed(100), MotorEffort::Forward(100));
        assert_eq!(MotorEffort::from_speed(-1), MotorEffort::Backward(1));
        assert_eq!(MotorEffort::from_speed(-100), MotorEffort::Backward(100));
    }

    #[test]
    fn scale_matches_integer_map() {
        let range = DutyRange::DEFAULT;
        assert_eq!(range.scale(0), 600);
        assert_eq!(range.scale(1), 604);
        assert_eq!(range.scale(50), 811);
        assert_eq!(range.scale(100), 1023);
        // clamps rather than extrapolating
        assert_eq!(range.scale(200), 1023);
    }

    #[test]
    fn forward_duty_is_monotonic_on_input_1() {
        let range = DutyRange::DEFAULT;
        let mut last = 0;
        for speed in 1..=100 {
            let duty = range.channels(MotorEffort::from_speed(speed));
            assert_eq!(duty.input_2, 0);
            assert!(duty.input_1 > last);
            last = duty.input_1;
        }
    }

    #[test]
    fn backward_duty_is_monotonic_on_input_2() {
        let range = DutyRange::DEFAULT;
        let mut last = 0;
        for speed in 1..=100 {
            let duty = range.channels(MotorEffort::from_speed(-speed));
            assert_eq!(duty.input_1, 0);
            assert!(duty.input_2 > last);
            last = duty.input_2;
        }
    }
}
