use lift_core::HBridge;

use crate::pwm::{LowerPwm, RaisePwm};

pub type LiftMotor = HBridge<RaisePwm, LowerPwm>;
