use stm32f4xx_hal::gpio::{Output, PushPull, PD12};

pub type StatusLed = PD12<Output<PushPull>>;
