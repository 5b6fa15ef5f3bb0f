//! Hardware independent pieces of the camera lift.
//!
//! Everything in here is written against the `embedded-hal` 1.0 traits so it can be driven by the
//! board crate on target and by fakes on the host.

#![cfg_attr(not(test), no_std)]

pub mod calibration;
pub mod config;
pub mod encoder;
pub mod motor;
pub mod port;

#[cfg(test)]
mod test_utils;

pub use calibration::{Calibration, Correction};
pub use config::{LiftConfig, Travel};
pub use encoder::{Direction, EncoderSensor, EncoderSnapshot, HeightGauge, PulseCounter, PulseInput};
pub use motor::{hbridge::HBridge, DriveError, DutyRange, MotorEffort, OpenLoopDrive};
pub use port::PortCell;
