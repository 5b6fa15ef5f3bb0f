use stm32f4xx_hal::{pac::TIM3, time::Hertz, timer::PwmChannel};

/// Well above audible range so the motor does not whine.
pub const PWM_FREQUENCY: Hertz = Hertz::kHz(25);

/// TIM3 CH1 on PC6, drives the bridge towards the top of travel.
pub type RaisePwm = PwmChannel<TIM3, 0>;
/// TIM3 CH2 on PC7.
pub type LowerPwm = PwmChannel<TIM3, 1>;
