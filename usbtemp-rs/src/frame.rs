use core::time::Duration;

use embedded_onewire::{OneWireError, OneWireResult};
use log::debug;

use crate::Transport;

/// Receive buffer for one exchange: a fixed size and a fill counter.
///
/// The buffer lives inside the read future, so a timed-out read leaves
/// nothing behind on the transport.
struct Frame<const N: usize> {
    buf: [u8; N],
    received: usize,
}

impl<const N: usize> Frame<N> {
    fn new() -> Self {
        Self {
            buf: [0; N],
            received: 0,
        }
    }

    async fn fill<T: Transport>(&mut self, port: &mut T) -> Result<(), T::Error> {
        while self.received < N {
            let n = port.read(&mut self.buf[self.received..]).await?;
            if n == 0 {
                tokio::task::yield_now().await;
            }
            self.received += n;
        }
        Ok(())
    }
}

/// Read exactly `N` bytes, giving up after `timeout`.
pub(crate) async fn read_frame<T: Transport, const N: usize>(
    port: &mut T,
    timeout: Duration,
) -> OneWireResult<[u8; N], T::Error> {
    let mut frame = Frame::<N>::new();
    let filled = tokio::time::timeout(timeout, frame.fill(port)).await;
    match filled {
        Ok(res) => res?,
        Err(_) => {
            debug!("read timeout after {}/{} bytes", frame.received, N);
            return Err(OneWireError::ReadTimeout);
        }
    }
    Ok(frame.buf)
}
