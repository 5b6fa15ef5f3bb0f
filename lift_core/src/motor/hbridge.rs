use embedded_hal::pwm::SetDutyCycle;

use super::{ChannelDuty, DriveError, DutyRange, MotorEffort, OpenLoopDrive, DUTY_RESOLUTION};

/// Two-input bridge: input 1 raises the carriage, input 2 lowers it.
pub struct HBridge<A, B> {
    input_1: A,
    input_2: B,
    range: DutyRange,
    effort: MotorEffort,
    duty: ChannelDuty,
}

impl<A: SetDutyCycle, B: SetDutyCycle> HBridge<A, B> {
    pub fn new(
        input_1: A,
        input_2: B,
        range: DutyRange,
    ) -> Result<Self, DriveError<A::Error, B::Error>> {
        let mut bridge = Self {
            input_1,
            input_2,
            range,
            effort: MotorEffort::Release,
            duty: ChannelDuty::default(),
        };

        // set an initial state
        bridge.set_input_1(0)?;
        bridge.set_input_2(0)?;

        Ok(bridge)
    }

    /// Duty last written to each input, on the 10 bit scale.
    pub fn duty(&self) -> ChannelDuty {
        self.duty
    }

    pub fn release(&mut self) -> Result<(), DriveError<A::Error, B::Error>> {
        self.drive(MotorEffort::Release)
    }

    pub fn free(self) -> (A, B) {
        (self.input_1, self.input_2)
    }

    fn set_input_1(&mut self, duty: u16) -> Result<(), DriveError<A::Error, B::Error>> {
        self.input_1
            .set_duty_cycle_fraction(duty.min(DUTY_RESOLUTION), DUTY_RESOLUTION)
            .map_err(DriveError::Input1)?;
        self.duty.input_1 = duty;
        Ok(())
    }

    fn set_input_2(&mut self, duty: u16) -> Result<(), DriveError<A::Error, B::Error>> {
        self.input_2
            .set_duty_cycle_fraction(duty.min(DUTY_RESOLUTION), DUTY_RESOLUTION)
            .map_err(DriveError::Input2)?;
        self.duty.input_2 = duty;
        Ok(())
    }

    fn switch(&mut self, target: ChannelDuty) -> Result<(), DriveError<A::Error, B::Error>> {
        // The input being switched off always goes first, both must never be driven together.
        if target.input_1 == 0 {
            self.set_input_1(0)?;
            self.set_input_2(target.input_2)
        } else {
            self.set_input_2(0)?;
            self.set_input_1(target.input_1)
        }
    }
}

impl<A: SetDutyCycle, B: SetDutyCycle> OpenLoopDrive for HBridge<A, B> {
    type Error = DriveError<A::Error, B::Error>;

    fn drive(&mut self, effort: MotorEffort) -> Result<(), Self::Error> {
        let target = self.range.channels(effort);

        // `duty` follows each write that landed, so after a failure it still matches the bridge.
        if let Err(e) = self.switch(target) {
            if self.duty == ChannelDuty::default() {
                self.effort = MotorEffort::Release;
            }
            return Err(e);
        }

        if effort != self.effort {
            log::trace!("lift motor {:?} -> {:?}", self.effort, effort);
        }
        self.effort = effort;

        Ok(())
    }

    fn current_effort(&self) -> MotorEffort {
        self.effort
    }
}
