//! Move the carriage by hand and watch the count follow it over RTT.
//! If the count never changes, check the pulse and direction wiring.

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use cortex_m_rt::entry;
use defmt::{debug, info};
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use panic_halt as _;
use stm32f4xx_hal::pac::{self, interrupt};

use lift_core::{EncoderSensor, LiftConfig, PulseCounter};
use lift_hardware::{encoder::EncoderLines, LiftHardware};

static PULSES: PulseCounter = PulseCounter::new();
static LINES: Mutex<RefCell<Option<EncoderLines<'static>>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().expect("Failed to get device periph");
    let cp = cortex_m::peripheral::Peripherals::take().expect("Failed to get core periph");

    let config = LiftConfig::DEFAULT;
    let hw = LiftHardware::init(dp, cp, &config);
    let mut delay = hw.delay;

    let sensor = EncoderSensor::new(hw.direction_pin, &PULSES, &config);
    let (input, gauge) = sensor.split();
    cortex_m::interrupt::free(|cs| {
        LINES
            .borrow(cs)
            .replace(Some(EncoderLines::new(hw.pulse_pin, input)));
    });
    unsafe { cortex_m::peripheral::NVIC::unmask(pac::Interrupt::EXTI15_10) };

    info!("watching encoder, {}", config.calibration);

    let mut last = gauge.count();
    loop {
        let snapshot = gauge.snapshot();
        if snapshot.counts != last {
            info!("moved! delta = {}", snapshot.counts.wrapping_sub(last));
            last = snapshot.counts;
        }
        debug!("{}", snapshot);

        delay.delay_ms(300);
    }
}

#[interrupt]
fn EXTI15_10() {
    cortex_m::interrupt::free(|cs| {
        if let Some(lines) = LINES.borrow(cs).borrow_mut().as_mut() {
            lines.on_interrupt();
        }
    });
}
