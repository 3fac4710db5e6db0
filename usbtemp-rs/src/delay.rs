use core::time::Duration;

use embedded_hal_async::delay::DelayNs;

/// [`DelayNs`] on the tokio timer, so waits yield to other tasks.
///
/// The timer has millisecond resolution: `delay_us` and `delay_ns` round up
/// to the next whole millisecond.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

impl DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(ns.into())).await;
    }

    async fn delay_us(&mut self, us: u32) {
        tokio::time::sleep(Duration::from_micros(us.into())).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(ms.into())).await;
    }
}
