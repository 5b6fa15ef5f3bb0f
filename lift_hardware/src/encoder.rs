use stm32f4xx_hal::gpio::{ExtiPin, Input, PB10, PB11};

use lift_core::{Direction, PulseInput};

/// Encoder pulse line, interrupts on the falling edge (EXTI15_10).
pub type PulsePin = PB10<Input>;
/// Encoder direction line, only sampled from the pulse interrupt.
pub type DirectionPin = PB11<Input>;

/// The pulse line together with the interrupt half of the sensor.
///
/// Meant to be owned by the EXTI handler; [`on_interrupt`](Self::on_interrupt) is the whole body.
pub struct EncoderLines<'a> {
    pulse: PulsePin,
    input: PulseInput<'a, DirectionPin>,
}

impl<'a> EncoderLines<'a> {
    pub fn new(pulse: PulsePin, input: PulseInput<'a, DirectionPin>) -> Self {
        Self { pulse, input }
    }

    /// Returns `None` when the shared EXTI line fired for some other pin.
    pub fn on_interrupt(&mut self) -> Option<Direction> {
        if !self.pulse.check_interrupt() {
            return None;
        }
        self.pulse.clear_interrupt_pending_bit();

        match self.input.on_falling_edge() {
            Ok(direction) => Some(direction),
            Err(never) => match never {},
        }
    }
}
