#![allow(async_fn_in_trait)]
use crate::{
    OneWireError, OneWireResult, OneWireStatus, RomCode,
    consts::{ONEWIRE_READ_ROM_CMD, ONEWIRE_SKIP_ROM_CMD},
};

/// Bus master of a single-drop 1-Wire bus.
///
/// Implementors provide the four line primitives (reset, byte and bit
/// transfers); the ROM-level transactions are built on top of them.
///
/// Every method assumes the caller holds the bus exclusively for the whole
/// transaction, which the `&mut self` receiver enforces.
pub trait OneWireAsync {
    /// Outcome of a reset, see [OneWireStatus].
    type Status: OneWireStatus;
    /// Failure of the link between host and bus master.
    type BusError;

    /// Issues a reset pulse and samples the presence pulse.
    ///
    /// # Errors
    /// [`OneWireError::NoDevicePresent`], [`OneWireError::ShortCircuit`] or
    /// [`OneWireError::PresenceError`] when no healthy presence pulse followed
    /// the reset, or any transport error.
    async fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Puts `byte` on the line, least significant bit first.
    ///
    /// # Errors
    /// [`OneWireError::ResponseMismatch`] when the line did not carry the byte,
    /// or any transport error.
    async fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError>;

    /// Runs eight read slots and returns the assembled byte.
    async fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError>;

    /// Runs one write slot.
    async fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Runs one read slot.
    async fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Fills `buf` with consecutive bytes read from the bus.
    async fn read_bytes(&mut self, buf: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        for b in buf.iter_mut() {
            *b = self.read_byte().await?;
        }
        Ok(())
    }

    /// Addresses the single device on the bus.
    ///
    /// Resets the bus and issues Skip ROM, so that the next byte written is a
    /// function command for the device.
    async fn skip_rom(&mut self) -> OneWireResult<(), Self::BusError> {
        self.reset().await?;
        self.write_byte(ONEWIRE_SKIP_ROM_CMD).await
    }

    /// Reads the ROM code of the single device on the bus.
    ///
    /// # Errors
    /// [`OneWireError::InvalidCrc`] if the eight received bytes do not
    /// checksum to zero, plus any error from the reset or byte exchanges.
    async fn read_rom(&mut self) -> OneWireResult<RomCode, Self::BusError> {
        self.reset().await?;
        self.write_byte(ONEWIRE_READ_ROM_CMD).await?;
        let mut raw = [0; RomCode::BYTES];
        self.read_bytes(&mut raw).await?;
        RomCode::new(raw).ok_or(OneWireError::InvalidCrc)
    }
}
