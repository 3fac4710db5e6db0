//! ROM command constants for 1-Wire communication.

/// Command to read the ROM code of the only device on the bus.
///
/// Only valid on a single-drop bus: with several devices the replies
/// collide on the wired-AND line and the CRC check fails.
pub const ONEWIRE_READ_ROM_CMD: u8 = 0x33;

/// Command to skip ROM address in 1-Wire communication (non-overdrive mode)
///
/// On a single-drop bus this command lets the master access the
/// function commands without providing the 64-bit ROM code.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;
