//! Pulse and direction encoder on the lift belt.
//!
//! The pulse line raises an interrupt on each falling edge. The handler samples the direction line
//! and moves a shared count by one. The count is read back from the main context and converted to a
//! height. Both sides go through a critical section, so a read can never see half of an update even
//! on cores without 32 bit atomics.

use core::cell::Cell;

use critical_section::Mutex;
use embedded_hal::digital::InputPin;

use crate::calibration::Calibration;
use crate::config::{LiftConfig, Travel};

/// Direction line level sampled at a pulse edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_level(high: bool) -> Self {
        if high {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    fn step(self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// Signed pulse count shared between the edge interrupt and the measurement path.
///
/// Lives in a `static` on target. Wraps at the `i32` bounds.
pub struct PulseCounter {
    count: Mutex<Cell<i32>>,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_count(count: i32) -> Self {
        Self {
            count: Mutex::new(Cell::new(count)),
        }
    }

    pub fn record(&self, direction: Direction) {
        critical_section::with(|cs| {
            let count = self.count.borrow(cs);
            count.set(count.get().wrapping_add(direction.step()));
        });
    }

    pub fn count(&self) -> i32 {
        critical_section::with(|cs| self.count.borrow(cs).get())
    }

    /// Zero the count, returning what it held.
    pub fn reset(&self) -> i32 {
        critical_section::with(|cs| self.count.borrow(cs).replace(0))
    }
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt side of the sensor: owns the direction line.
pub struct PulseInput<'a, D> {
    direction: D,
    counter: &'a PulseCounter,
}

impl<'a, D: InputPin> PulseInput<'a, D> {
    pub fn new(direction: D, counter: &'a PulseCounter) -> Self {
        Self { direction, counter }
    }

    /// Call on every falling edge of the pulse line. Keep the caller short, this runs in the ISR.
    pub fn on_falling_edge(&mut self) -> Result<Direction, D::Error> {
        let direction = Direction::from_level(self.direction.is_high()?);
        self.counter.record(direction);
        Ok(direction)
    }

    pub fn free(self) -> D {
        self.direction
    }
}

/// Raw and converted encoder state, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSnapshot {
    pub counts: i32,
    pub linear_mm: f32,
    pub distance_mm: f32,
    pub pulses_per_mm: f32,
    pub within_travel: bool,
}

/// Measurement side of the sensor.
pub struct HeightGauge<'a> {
    counter: &'a PulseCounter,
    calibration: Calibration,
    travel: Travel,
}

impl<'a> HeightGauge<'a> {
    pub fn new(counter: &'a PulseCounter, calibration: Calibration, travel: Travel) -> Self {
        Self {
            counter,
            calibration,
            travel,
        }
    }

    pub fn count(&self) -> i32 {
        self.counter.count()
    }

    /// Calibrated carriage height in mm. Always returns a value.
    pub fn measure_distance(&self) -> f32 {
        self.calibration.height(self.counter.count())
    }

    pub fn snapshot(&self) -> EncoderSnapshot {
        let counts = self.counter.count();
        let distance_mm = self.calibration.height(counts);
        EncoderSnapshot {
            counts,
            linear_mm: self.calibration.linear_height(counts),
            distance_mm,
            pulses_per_mm: self.calibration.pulses_per_mm,
            within_travel: self.travel.contains(distance_mm),
        }
    }

    /// The carriage is sitting at home: the baseline height applies again.
    pub fn home(&self) {
        let dropped = self.counter.reset();
        log::info!("encoder homed, dropped {} pulses", dropped);
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = calibration;
    }
}

/// Both halves of the encoder, for callers that service the edge and measure from one context.
/// Firmware with a real interrupt will [`split`](Self::split) it.
pub struct EncoderSensor<'a, D> {
    input: PulseInput<'a, D>,
    gauge: HeightGauge<'a>,
}

impl<'a, D: InputPin> EncoderSensor<'a, D> {
    pub fn new(direction: D, counter: &'a PulseCounter, config: &LiftConfig) -> Self {
        Self {
            input: PulseInput::new(direction, counter),
            gauge: HeightGauge::new(counter, config.calibration, config.travel),
        }
    }

    pub fn on_falling_edge(&mut self) -> Result<Direction, D::Error> {
        self.input.on_falling_edge()
    }

    pub fn measure_distance(&self) -> f32 {
        self.gauge.measure_distance()
    }

    pub fn snapshot(&self) -> EncoderSnapshot {
        self.gauge.snapshot()
    }

    pub fn home(&self) {
        self.gauge.home()
    }

    pub fn split(self) -> (PulseInput<'a, D>, HeightGauge<'a>) {
        (self.input, self.gauge)
    }
}
