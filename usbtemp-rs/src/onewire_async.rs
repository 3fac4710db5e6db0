use crate::{
    BusSpeed, Presence, Transport, UsbTemp,
    codec::{READ_BYTE, SLOT_HIGH, decode_bit, decode_byte, encode_bit, encode_byte},
};
use embedded_onewire::{OneWireAsync, OneWireError, OneWireResult};
use log::{debug, warn};

/// Character whose low phase makes the reset pulse at 9600 baud.
const ONEWIRE_RESET_PULSE: u8 = 0xf0;

impl<T: Transport> OneWireAsync for UsbTemp<T> {
    type Status = Presence;

    type BusError = T::Error;

    async fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        self.set_speed(BusSpeed::Reset).await?;
        let reply = self.exchange(&[ONEWIRE_RESET_PULSE]).await;
        // slot speed comes back whether or not the device answered
        self.set_speed(BusSpeed::Normal).await?;
        let presence = Presence::from(reply?[0]);
        debug!("reset: {presence:?}");
        presence.check()
    }

    async fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        self.set_speed(BusSpeed::Normal).await?;
        let echo = decode_byte(&self.exchange(&encode_byte(byte)).await?);
        if echo != byte {
            warn!("wrote {byte:#04x}, line carried {echo:#04x}");
            return Err(OneWireError::ResponseMismatch {
                expected: byte,
                actual: echo,
            });
        }
        Ok(())
    }

    async fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        self.set_speed(BusSpeed::Normal).await?;
        Ok(decode_byte(&self.exchange(&READ_BYTE).await?))
    }

    async fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        self.set_speed(BusSpeed::Normal).await?;
        let [echo] = self.exchange(&[encode_bit(bit)]).await?;
        if decode_bit(echo) != bit {
            return Err(OneWireError::ResponseMismatch {
                expected: bit as u8,
                actual: decode_bit(echo) as u8,
            });
        }
        Ok(())
    }

    async fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        self.set_speed(BusSpeed::Normal).await?;
        let [echo] = self.exchange(&[SLOT_HIGH]).await?;
        Ok(decode_bit(echo))
    }
}
