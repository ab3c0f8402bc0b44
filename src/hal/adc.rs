//! ADC Driver
//!
//! Blocking reads of the tuning potentiometer on ADC1.

use embassy_stm32::adc::{Adc, AdcChannel, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;

use crate::config::ADC_MAX;
use crate::ports::AnalogSource;

/// ADC reading result
#[derive(Clone, Copy, Debug)]
pub struct AdcReading {
    /// Raw 12-bit ADC value (0-4095)
    raw: u16,
}

impl AdcReading {
    /// Create a new ADC reading from raw value
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    /// Get the raw 12-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Rescale to the 10-bit pot scale
    #[must_use]
    pub const fn as_pot_scale(self) -> u16 {
        let scaled = self.raw >> 2;
        if scaled > ADC_MAX {
            ADC_MAX
        } else {
            scaled
        }
    }
}

impl defmt::Format for AdcReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({})", self.raw);
    }
}

/// Tuning pot on ADC1
pub struct TuningPotAdc<'d> {
    adc: Adc<'d, ADC1>,
    channel: AnyAdcChannel<ADC1>,
}

impl<'d> TuningPotAdc<'d> {
    /// Create the pot reader on the given ADC1 input
    #[must_use]
    pub fn new(adc: ADC1, channel: impl AdcChannel<ADC1>) -> Self {
        let mut adc = Adc::new(adc);
        // Pot wiper is high impedance
        adc.set_sample_time(SampleTime::CYCLES247_5);
        Self {
            adc,
            channel: channel.degrade_adc(),
        }
    }

    /// Read one raw sample
    pub fn read(&mut self) -> AdcReading {
        AdcReading::from_raw(self.adc.blocking_read(&mut self.channel))
    }
}

impl AnalogSource for TuningPotAdc<'_> {
    fn read_sample(&mut self) -> u16 {
        self.read().as_pot_scale()
    }
}
