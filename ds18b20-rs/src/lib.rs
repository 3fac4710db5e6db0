#![no_std]
//! Temperature transactions for a single DS18B20 on a 1-Wire bus.
//!
//! The device is addressed with Skip ROM, so the bus must carry exactly one
//! device. Bus access goes through [`OneWireAsync`]; holding `&mut` to the bus
//! for the duration of a call keeps the transaction exclusive, including the
//! conversion wait.
use embedded_hal_async::delay::DelayNs;
use embedded_onewire::{OneWireAsync, OneWireError, OneWireResult};

mod scratchpad;
pub use scratchpad::{Configuration, Resolution, Scratchpad, Temperature};

const DS18B20_START_CONV: u8 = 0x44;
const DS18B20_READ_SCRATCH: u8 = 0xbe;

/// Fixed wait after Convert T. The data sheet allows up to 750 ms at 12-bit
/// resolution; the extra 50 ms is margin.
pub const DS18B20_CONVERSION_DELAY_MS: u32 = 800;

/// Session with the DS18B20 on a single-drop bus.
#[derive(Debug, Clone, Copy)]
pub struct Ds18b20 {
    conversion_delay_ms: u32,
}

impl Default for Ds18b20 {
    fn default() -> Self {
        Self::new()
    }
}

impl Ds18b20 {
    /// Family code in the first byte of a DS18B20 ROM code.
    #[inline]
    pub const fn family() -> u8 {
        0x28
    }

    pub const fn new() -> Self {
        Self {
            conversion_delay_ms: DS18B20_CONVERSION_DELAY_MS,
        }
    }

    /// Override the wait between Convert T and Read Scratchpad.
    pub fn with_conversion_delay_ms(mut self, ms: u32) -> Self {
        self.conversion_delay_ms = ms;
        self
    }

    pub fn conversion_delay_ms(&self) -> u32 {
        self.conversion_delay_ms
    }

    /// Reset, Skip ROM, Convert T.
    pub async fn start_conversion<O: OneWireAsync>(
        &self,
        bus: &mut O,
    ) -> OneWireResult<(), O::BusError> {
        bus.skip_rom().await?;
        bus.write_byte(DS18B20_START_CONV).await
    }

    /// Reset, Skip ROM, Read Scratchpad, then check the CRC over all nine bytes.
    pub async fn read_scratchpad<O: OneWireAsync>(
        &self,
        bus: &mut O,
    ) -> OneWireResult<Scratchpad, O::BusError> {
        bus.skip_rom().await?;
        bus.write_byte(DS18B20_READ_SCRATCH).await?;
        let mut buf = [0; Scratchpad::BYTES];
        bus.read_bytes(&mut buf).await?;
        Scratchpad::new(buf).ok_or(OneWireError::InvalidCrc)
    }

    /// Full temperature transaction, in degrees Celsius.
    ///
    /// Starts a conversion, waits the fixed conversion delay without touching
    /// the bus, then reads and validates the scratchpad. Nothing is retried;
    /// the first failure is returned.
    pub async fn read_temperature<O: OneWireAsync, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> OneWireResult<f32, O::BusError> {
        self.start_conversion(bus).await?;
        delay.delay_ms(self.conversion_delay_ms).await; // wait till conversion is finished
        let scratchpad = self.read_scratchpad(bus).await?;
        Ok(scratchpad.celsius())
    }
}
