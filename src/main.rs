#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod loggers;

#[cfg(target_os = "none")]
use lift_core::PulseCounter;

#[cfg(target_os = "none")]
const NAME: &str = env!("CARGO_PKG_NAME");
#[cfg(target_os = "none")]
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(target_os = "none")]
const REPORT_PERIOD_MS: u64 = 500;

/// Written by the encoder EXTI handler, read by the height report.
#[cfg(target_os = "none")]
static PULSES: PulseCounter = PulseCounter::new();

// Only the board build does anything, host builds exist so `cargo test` works on the workspace.
#[cfg(not(target_os = "none"))]
fn main() {}

#[cfg(target_os = "none")]
#[rtic::app(device = stm32f4xx_hal::pac, dispatchers = [USART2])]
mod app {
    use super::*;

    use fugit::ExtU64;
    use log::{info, warn};
    use rtic_monotonics::stm32::Tim2;

    use lift_core::{EncoderSensor, HeightGauge, LiftConfig, OpenLoopDrive};
    use lift_hardware::{encoder::EncoderLines, led::StatusLed, motors::LiftMotor, LiftHardware};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        encoder_lines: EncoderLines<'static>,
        gauge: HeightGauge<'static>,
        motor: LiftMotor,
        status_led: StatusLed,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        let config = LiftConfig::DEFAULT;
        let hw = LiftHardware::init(ctx.device, ctx.core, &config);

        loggers::init(hw.dbg_serial, loggers::Level::Info);
        info!("{} v{}", NAME, VERSION);

        let token = rtic_monotonics::create_stm32_tim2_monotonic_token!();
        Tim2::start(hw.tim2_clock_hz, token);

        let sensor = EncoderSensor::new(hw.direction_pin, &PULSES, &config);
        let (input, gauge) = sensor.split();
        let encoder_lines = EncoderLines::new(hw.pulse_pin, input);

        info!(
            "motor {:?}, home at {} mm, {} pulses/mm",
            hw.motor.current_effort(),
            config.calibration.baseline_mm,
            config.calibration.pulses_per_mm
        );

        report_height::spawn().ok();

        (
            Shared {},
            Local {
                encoder_lines,
                gauge,
                motor: hw.motor,
                status_led: hw.status_led,
            },
        )
    }

    #[idle(local = [motor])]
    fn idle(ctx: idle::Context) -> ! {
        info!("idle!");

        // Nothing on this board commands the lift, hold the bridge released.
        if let Err(e) = ctx.local.motor.release() {
            warn!("could not release motor: {}", e);
        }

        loop {
            cortex_m::asm::wfi();
        }
    }

    #[task(priority = 4, binds = EXTI15_10, local = [encoder_lines])]
    fn encoder_pulse(ctx: encoder_pulse::Context) {
        ctx.local.encoder_lines.on_interrupt();
    }

    #[task(priority = 1, local = [gauge, status_led])]
    async fn report_height(ctx: report_height::Context) {
        let mut last_count = ctx.local.gauge.count();

        loop {
            let snapshot = ctx.local.gauge.snapshot();
            if snapshot.counts != last_count {
                info!(
                    "height {} mm ({} pulses, moved {})",
                    snapshot.distance_mm,
                    snapshot.counts,
                    snapshot.counts.wrapping_sub(last_count)
                );
                last_count = snapshot.counts;
            }
            if !snapshot.within_travel {
                warn!("height {} mm is outside of travel", snapshot.distance_mm);
            }

            ctx.local.status_led.toggle();
            Tim2::delay(REPORT_PERIOD_MS.millis()).await;
        }
    }
}
