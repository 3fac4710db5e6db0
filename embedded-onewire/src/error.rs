use thiserror::Error;

/// One wire communication error type.
#[derive(Debug, Error)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying transport.
    #[error("bus transport error: {0:?}")]
    Other(E),
    /// Indicates that no device answered the reset pulse.
    #[error("no device present")]
    NoDevicePresent,
    /// Indicates that the bus was held low during the presence window.
    #[error("short circuit")]
    ShortCircuit,
    /// The presence reply did not match any known bus condition.
    #[error("presence error (reply {0:#04x})")]
    PresenceError(u8),
    /// The expected number of bytes did not arrive in time.
    #[error("read timeout")]
    ReadTimeout,
    /// The echo of a written byte disagrees with what was written.
    #[error("invalid response: wrote {expected:#04x}, read back {actual:#04x}")]
    ResponseMismatch {
        /// Value that was put on the bus.
        expected: u8,
        /// Value decoded from the echo.
        actual: u8,
    },
    /// Computed CRC of the received frame is invalid.
    #[error("invalid CRC")]
    InvalidCrc,
}

impl<E> OneWireError<E> {
    /// Whether retrying the whole transaction may succeed.
    ///
    /// Checksum, timeout and echo failures are line noise; a missing device,
    /// a shorted bus or a transport failure need attention first.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::InvalidCrc | Self::ReadTimeout | Self::ResponseMismatch { .. }
        )
    }
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Other(other)
    }
}
