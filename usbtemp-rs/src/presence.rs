use embedded_onewire::{OneWireError, OneWireResult, OneWireStatus};

/// Reply to the reset pulse, as echoed by the adapter.
///
/// The reset pulse is a 0xF0 character at 9600 baud: the low nibble plus the
/// start bit hold the line low for about 520 µs. A device answering with a
/// presence pulse pulls the line low while the upper bits are shifted out,
/// which clears some of them in the echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The echo came back unchanged: nothing answered.
    NoDevice,
    /// The line stayed low for the whole character.
    ShortCircuit,
    /// A presence pulse was seen; carries the raw reply.
    Present(u8),
    /// A reply that matches no known bus condition.
    Malformed(u8),
}

impl From<u8> for Presence {
    fn from(reply: u8) -> Self {
        match reply {
            0xf0 => Self::NoDevice,
            0x00 => Self::ShortCircuit,
            0x10..=0xe0 => Self::Present(reply),
            _ => Self::Malformed(reply),
        }
    }
}

impl Presence {
    /// Turn anything but a healthy presence pulse into the matching error.
    pub fn check<E>(self) -> OneWireResult<Self, E> {
        match self {
            Self::Present(_) => Ok(self),
            Self::NoDevice => Err(OneWireError::NoDevicePresent),
            Self::ShortCircuit => Err(OneWireError::ShortCircuit),
            Self::Malformed(reply) => Err(OneWireError::PresenceError(reply)),
        }
    }
}

impl OneWireStatus for Presence {
    fn presence(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    fn shortcircuit(&self) -> bool {
        matches!(self, Self::ShortCircuit)
    }
}
