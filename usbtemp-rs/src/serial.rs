use std::{io, path::Path};

use serial2_tokio::{CharSize, Parity, SerialPort, Settings, StopBits};

use crate::{NORMAL_BAUD, Transport};

/// Open the adapter at `path` as a raw 8N1 line at slot speed.
pub fn open_port(path: impl AsRef<Path>) -> io::Result<SerialPort> {
    SerialPort::open(path, |mut settings: Settings| {
        settings.set_raw();
        settings.set_baud_rate(NORMAL_BAUD)?;
        settings.set_char_size(CharSize::Bits8);
        settings.set_stop_bits(StopBits::One);
        settings.set_parity(Parity::None);
        Ok(settings)
    })
}

impl Transport for SerialPort {
    type Error = io::Error;

    async fn set_baud_rate(&mut self, baud_rate: u32) -> io::Result<()> {
        let mut settings = self.get_configuration()?;
        settings.set_baud_rate(baud_rate)?;
        self.set_configuration(&settings)
    }

    async fn discard_input(&mut self) -> io::Result<()> {
        self.discard_input_buffer()
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        SerialPort::write_all(self, bytes).await
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        SerialPort::read(self, buf).await.and_then(ended)
    }
}

/// A zero-length read means the adapter went away.
fn ended(n: usize) -> io::Result<usize> {
    if n == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "serial adapter disconnected",
        ));
    }
    Ok(n)
}
