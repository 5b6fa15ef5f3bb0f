//! Ramps the lift motor up and down through the whole speed range, then past it to check that
//! out of range speeds stop the bridge. Keep the carriage clear of the end stops.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt::info;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use panic_halt as _;
use stm32f4xx_hal::pac;

use lift_core::{LiftConfig, OpenLoopDrive};
use lift_hardware::LiftHardware;

const STEP_MS: u32 = 50;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().expect("Failed to get device periph");
    let cp = cortex_m::peripheral::Peripherals::take().expect("Failed to get core periph");

    let hw = LiftHardware::init(dp, cp, &LiftConfig::DEFAULT);
    let mut motor = hw.motor;
    let mut delay = hw.delay;
    let mut led = hw.status_led;

    loop {
        for speed in (0..=100).chain((-100..100).rev()).chain(-100..=0) {
            motor.set_speed(speed).unwrap();
            if speed % 25 == 0 {
                info!("speed {}: {}", speed, motor.duty());
            }
            delay.delay_ms(STEP_MS);
        }

        motor.set_speed(150).unwrap();
        info!("speed 150 -> {}", motor.current_effort());
        led.toggle();
        delay.delay_ms(2000);
    }
}
