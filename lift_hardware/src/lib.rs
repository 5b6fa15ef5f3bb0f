#![no_std]

use stm32f4xx_hal::{
    gpio::{Edge, ExtiPin},
    pac::{CorePeripherals, Peripherals},
    prelude::*,
    timer::{Channel1, Channel2, SysDelay},
};

use lift_core::{HBridge, LiftConfig};

pub mod encoder;
pub mod led;
pub mod motors;
pub mod pwm;
pub mod serial;

use encoder::{DirectionPin, PulsePin};
use led::StatusLed;
use motors::LiftMotor;
use pwm::PWM_FREQUENCY;
use serial::{DebugSerialPort, DEBUG_BAUD};

pub struct LiftHardware {
    pub delay: SysDelay,
    pub status_led: StatusLed,

    pub dbg_serial: DebugSerialPort,

    pub motor: LiftMotor,

    pub pulse_pin: PulsePin,
    pub direction_pin: DirectionPin,

    /// Clock feeding TIM2, for whoever runs a monotonic on it.
    pub tim2_clock_hz: u32,
}

impl LiftHardware {
    pub fn init(mut pac: Peripherals, core: CorePeripherals, config: &LiftConfig) -> Self {
        // set DBGMCU to allow wfi in idle while using defmt
        pac.DBGMCU.cr().modify(|_, w| {
            w.dbg_sleep().set_bit();
            w.dbg_standby().set_bit();
            w.dbg_stop().set_bit()
        });
        // enabling the dma1 clock keeps one AHB bus master active, which prevents SRAM from reading as 0's
        // https://github.com/probe-rs/probe-rs/issues/350#issuecomment-740550519
        pac.RCC.ahb1enr().modify(|_, w| w.dma1en().enabled());

        let mut syscfg = pac.SYSCFG.constrain();

        let rcc = pac.RCC.constrain();
        let clocks = rcc
            .cfgr
            .use_hse(8.MHz())
            .sysclk(168.MHz())
            .pclk1(42.MHz())
            .freeze();
        let delay = core.SYST.delay(&clocks);

        let gpioa = pac.GPIOA.split();
        let gpiob = pac.GPIOB.split();
        let gpioc = pac.GPIOC.split();
        let gpiod = pac.GPIOD.split();

        let mut status_led = gpiod.pd12.into_push_pull_output();
        status_led.set_low();

        let dbg_serial = pac
            .USART1
            .tx(gpioa.pa9.into_alternate(), DEBUG_BAUD.bps(), &clocks)
            .expect("Failed to set up debug serial");

        // Both bridge inputs share TIM3 so they run off one period
        let (mut raise, mut lower) = pac
            .TIM3
            .pwm_hz(
                (Channel1::new(gpioc.pc6), Channel2::new(gpioc.pc7)),
                PWM_FREQUENCY,
                &clocks,
            )
            .split();
        raise.enable();
        lower.enable();
        let motor =
            HBridge::new(raise, lower, config.duty).expect("Failed to zero lift motor inputs");

        let direction_pin = gpiob.pb11.into_pull_up_input();
        let mut pulse_pin = gpiob.pb10.into_pull_up_input();
        pulse_pin.make_interrupt_source(&mut syscfg);
        pulse_pin.trigger_on_edge(&mut pac.EXTI, Edge::Falling);
        pulse_pin.enable_interrupt(&mut pac.EXTI);

        Self {
            delay,
            status_led,
            dbg_serial,
            motor,
            pulse_pin,
            direction_pin,
            tim2_clock_hz: clocks.timclk1().raw(),
        }
    }
}
