use ds18b20::Ds18b20;
use embedded_onewire::{OneWireAsync, OneWireError, OneWireResult, RomCode};
use log::warn;
use tokio::sync::{Mutex, MutexGuard};

use crate::{TokioDelay, Transport, UsbTemp};
#[cfg(feature = "serial")]
use crate::{UsbTempBuilder, open_port};

/// A DS18B20 probe behind a USB-UART adapter.
///
/// The bus sits behind an async lock; every transaction holds it from the
/// first reset to the last CRC check, conversion wait included, so calls
/// from concurrent tasks run one after another.
pub struct Thermometer<T> {
    bus: Mutex<UsbTemp<T>>,
    sensor: Ds18b20,
}

#[cfg(feature = "serial")]
impl Thermometer<serial2_tokio::SerialPort> {
    /// Open the adapter at `path` with default settings.
    ///
    /// Resolves once the port is configured and at slot speed.
    pub async fn open(
        path: impl AsRef<std::path::Path>,
    ) -> std::io::Result<Self> {
        Self::open_with(path, UsbTempBuilder::default()).await
    }

    /// Open the adapter at `path` using `builder` for the bus settings.
    pub async fn open_with(
        path: impl AsRef<std::path::Path>,
        builder: UsbTempBuilder,
    ) -> std::io::Result<Self> {
        let port = open_port(path)?;
        Ok(Self::new(builder.build(port).await?))
    }
}

impl<T> Thermometer<T> {
    /// Wrap an initialized bus.
    pub fn new(bus: UsbTemp<T>) -> Self {
        Self {
            bus: Mutex::new(bus),
            sensor: Ds18b20::default(),
        }
    }

    /// Use `sensor` settings, such as a different conversion delay.
    pub fn with_sensor(mut self, sensor: Ds18b20) -> Self {
        self.sensor = sensor;
        self
    }

    /// Release the handle and give the transport back.
    pub fn close(self) -> T {
        self.bus.into_inner().into_inner()
    }
}

impl<T: Transport> Thermometer<T> {
    /// Exclusive access to the bus for a custom transaction.
    ///
    /// Other calls on this handle wait until the guard is dropped.
    pub async fn transaction(&self) -> MutexGuard<'_, UsbTemp<T>> {
        self.bus.lock().await
    }

    /// Read the 64-bit ROM code of the probe.
    pub async fn rom(&self) -> OneWireResult<RomCode, T::Error> {
        let mut bus = self.transaction().await;
        let rom = bus.read_rom().await.inspect_err(crc_warning)?;
        if rom.family() != Ds18b20::family() {
            warn!(
                "ROM {rom} has family {:#04x}, expected a DS18B20 ({:#04x})",
                rom.family(),
                Ds18b20::family()
            );
        }
        Ok(rom)
    }

    /// Convert and read the temperature, in degrees Celsius.
    pub async fn temperature(&self) -> OneWireResult<f32, T::Error> {
        let mut bus = self.transaction().await;
        self.sensor
            .read_temperature(&mut *bus, &mut TokioDelay)
            .await
            .inspect_err(crc_warning)
    }
}

fn crc_warning<E>(err: &OneWireError<E>) {
    if matches!(err, OneWireError::InvalidCrc) {
        warn!("frame failed its CRC check");
    }
}
