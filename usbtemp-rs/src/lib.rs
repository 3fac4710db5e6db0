#![deny(missing_docs)]

/*! # usbtemp
 *
 * A 1-Wire bus master for a single DS18B20 sitting behind a USB-UART
 * adapter, the layout sold as "usbtemp" probes.
 *
 * The adapter ties TX and RX to the 1-Wire line through an open-drain stage,
 * so every UART character it sends becomes a bus waveform and is echoed back
 * as the line was sampled. [`UsbTemp`] drives that waveform and implements
 * [`OneWireAsync`] on top of any [`Transport`]; [`Thermometer`] wraps it in a
 * lock so concurrent callers run whole transactions one at a time.
 */

pub use embedded_onewire::{OneWireAsync, OneWireError, OneWireResult, RomCode};
pub mod codec;
mod delay;
mod frame;
#[cfg(test)]
mod mock;
mod onewire_async;
mod presence;
#[cfg(feature = "serial")]
mod serial;
mod thermometer;
mod transport;

use core::time::Duration;

pub use delay::TokioDelay;
pub use presence::Presence;
#[cfg(feature = "serial")]
pub use serial::open_port;
pub use thermometer::Thermometer;
pub use transport::Transport;

use log::{debug, trace};

/// Line speed used to shape the reset pulse.
pub const RESET_BAUD: u32 = 9600;
/// Line speed used for bit slots.
pub const NORMAL_BAUD: u32 = 115200;
/// Default time allowed for an echo to arrive.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// The two line speeds the bus alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusSpeed {
    /// 9600 baud, reset and presence detect.
    Reset,
    /// 115200 baud, everything else.
    Normal,
}

impl BusSpeed {
    /// UART baud rate of this speed.
    pub const fn baud_rate(self) -> u32 {
        match self {
            BusSpeed::Reset => RESET_BAUD,
            BusSpeed::Normal => NORMAL_BAUD,
        }
    }
}

/// A 1-Wire bus master on top of a USB-UART adapter.
///
/// Takes ownership of a byte stream implementing [`Transport`].
pub struct UsbTemp<T> {
    pub(crate) port: T,
    pub(crate) speed: Option<BusSpeed>,
    pub(crate) timeout: Duration,
}

/// Configures and brings up a [`UsbTemp`].
#[derive(Debug, Clone, Copy)]
pub struct UsbTempBuilder {
    timeout: Duration,
}

impl Default for UsbTempBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl UsbTempBuilder {
    /// Creates a builder with the default read timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read timeout.
    ///
    /// Every exchange must be fully echoed within this time.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Takes ownership of `port`, flushes stale input and sets the slot speed.
    pub async fn build<T: Transport>(self, port: T) -> Result<UsbTemp<T>, T::Error> {
        let mut bus = UsbTemp {
            port,
            speed: None,
            timeout: self.timeout,
        };
        bus.port.discard_input().await?;
        bus.set_speed(BusSpeed::Normal).await?;
        Ok(bus)
    }
}

impl<T> UsbTemp<T> {
    /// Read timeout of each exchange.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Last line speed known to be applied, if any.
    pub fn speed(&self) -> Option<BusSpeed> {
        self.speed
    }

    /// Gives the byte stream back.
    pub fn into_inner(self) -> T {
        self.port
    }
}

impl<T: Transport> UsbTemp<T> {
    /// Switch the line speed unless it is already applied.
    pub(crate) async fn set_speed(&mut self, speed: BusSpeed) -> Result<(), T::Error> {
        if self.speed == Some(speed) {
            return Ok(());
        }
        // unknown until the port confirms
        self.speed = None;
        debug!("switching to {} baud", speed.baud_rate());
        self.port.set_baud_rate(speed.baud_rate()).await?;
        self.speed = Some(speed);
        Ok(())
    }

    /// Write `tx` and collect its echo.
    pub(crate) async fn exchange<const N: usize>(
        &mut self,
        tx: &[u8; N],
    ) -> OneWireResult<[u8; N], T::Error> {
        self.port.discard_input().await?;
        self.port.write_all(tx).await?;
        let rx = frame::read_frame(&mut self.port, self.timeout).await?;
        trace!("tx {tx:02x?} rx {rx:02x?}");
        Ok(rx)
    }
}
