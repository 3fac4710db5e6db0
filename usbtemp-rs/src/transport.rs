#![allow(async_fn_in_trait)]
use core::fmt::Debug;

/// Byte stream between the host and the USB-UART adapter.
///
/// The adapter echoes every byte it shifts out, as sampled on the 1-Wire
/// line, so each write is answered by the same number of bytes.
pub trait Transport {
    /// I/O error of the underlying stream.
    type Error: Debug;

    /// Change the line speed. Bytes written afterwards use the new rate.
    async fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error>;

    /// Drop any received bytes that were not read yet.
    async fn discard_input(&mut self) -> Result<(), Self::Error>;

    /// Write all of `bytes` to the stream.
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read at least one byte into `buf`, waiting until one is available.
    ///
    /// Returns the number of bytes read. A stream that has ended must report
    /// an error rather than `Ok(0)`.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
