//! Battery gauge.
//!
//! Samples the supply rail through the SAADC's internal VDD input and
//! maps the voltage onto the discharge curve. No fuel gauge chip on
//! this board; close enough for a corner-of-screen percentage.

use embassy_futures::block_on;
use embassy_nrf::saadc::{ChannelConfig, Config, Saadc, VddInput};
use embassy_nrf::{bind_interrupts, peripherals, saadc};

use crate::power::{vbat_to_percent, BatteryGauge};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

pub struct VddGauge {
    adc: Saadc<'static, 1>,
}

impl VddGauge {
    pub fn new(saadc: peripherals::SAADC) -> Self {
        let config = Config::default();
        let channel = ChannelConfig::single_ended(VddInput);
        Self {
            adc: Saadc::new(saadc, Irqs, config, [channel]),
        }
    }
}

impl BatteryGauge for VddGauge {
    fn percent(&mut self) -> Option<f32> {
        let mut samples = [0i16; 1];
        block_on(self.adc.sample(&mut samples));
        let raw = u32::from(samples[0].max(0) as u16);
        // 12-bit result, gain 1/6, 0.6 V reference: full scale is 3.6 V.
        let millivolts = raw * 3600 / 4096;
        Some(vbat_to_percent(millivolts))
    }
}
