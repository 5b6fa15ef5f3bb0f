use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::{digital, pwm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

impl pwm::Error for FakeError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl digital::Error for FakeError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Every duty write made by a group of fake channels, in order.
#[derive(Clone, Default)]
pub struct PwmLog(Rc<RefCell<Vec<(u8, u16)>>>);

impl PwmLog {
    fn push(&self, channel: u8, duty: u16) {
        self.0.borrow_mut().push((channel, duty));
    }

    /// Current (channel 1, channel 2) duty after replaying the log.
    pub fn levels(&self) -> (u16, u16) {
        let mut levels = (0, 0);
        for &(channel, duty) in self.0.borrow().iter() {
            match channel {
                1 => levels.0 = duty,
                _ => levels.1 = duty,
            }
        }
        levels
    }

    pub fn ever_overlapped(&self) -> bool {
        let mut levels = (0, 0);
        for &(channel, duty) in self.0.borrow().iter() {
            match channel {
                1 => levels.0 = duty,
                _ => levels.1 = duty,
            }
            if levels.0 != 0 && levels.1 != 0 {
                return true;
            }
        }
        false
    }
}

pub struct FakePwm {
    channel: u8,
    max: u16,
    fail: bool,
    log: PwmLog,
}

impl FakePwm {
    pub fn new(channel: u8, max: u16, log: &PwmLog) -> Self {
        Self {
            channel,
            max,
            fail: false,
            log: log.clone(),
        }
    }

    pub fn fail_next(&mut self) {
        self.fail = true;
    }
}

impl pwm::ErrorType for FakePwm {
    type Error = FakeError;
}

impl pwm::SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail {
            self.fail = false;
            return Err(FakeError);
        }
        self.log.push(self.channel, duty);
        Ok(())
    }
}

/// Input pin whose level is set from the test through a shared handle.
/// `None` makes reads fail.
#[derive(Clone, Default)]
pub struct FakePin(Rc<Cell<Option<bool>>>);

impl FakePin {
    pub fn set_high(&self) {
        self.0.set(Some(true));
    }

    pub fn set_low(&self) {
        self.0.set(Some(false));
    }

    pub fn break_wire(&self) {
        self.0.set(None);
    }
}

impl digital::ErrorType for FakePin {
    type Error = FakeError;
}

impl digital::InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.get().ok_or(FakeError)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
