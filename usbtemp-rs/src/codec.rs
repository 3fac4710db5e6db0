//! Bit slots as UART bytes.
//!
//! At 115200 baud one UART character (start bit, 8 data bits, stop bit)
//! lasts about 87 µs, which is the length of a 1-Wire time slot. The start
//! bit pulls the line low to open the slot; the data bits then either keep
//! it low (write 0) or release it (write 1, or read). The adapter echoes what
//! it saw on the open-drain line, so a released slot comes back as 0xFF only
//! if no device pulled the line low.

/// Slot pattern writing a 1, or releasing the line for a read.
pub const SLOT_HIGH: u8 = 0xff;
/// Slot pattern writing a 0.
pub const SLOT_LOW: u8 = 0x00;
/// Eight read slots, one byte's worth.
pub const READ_BYTE: [u8; 8] = [SLOT_HIGH; 8];

/// Outbound slot pattern for `bit`.
pub fn encode_bit(bit: bool) -> u8 {
    if bit { SLOT_HIGH } else { SLOT_LOW }
}

/// Logical value of an echoed slot. Anything short of a fully released line
/// means a device (or the master) held it low.
pub fn decode_bit(echo: u8) -> bool {
    echo == SLOT_HIGH
}

/// Slot patterns for `byte`, least significant bit first.
pub fn encode_byte(byte: u8) -> [u8; 8] {
    core::array::from_fn(|i| encode_bit((byte >> i) & 0x01 == 0x01))
}

/// Byte carried by eight echoed slots, least significant bit first.
pub fn decode_byte(echo: &[u8; 8]) -> u8 {
    echo.iter()
        .rev()
        .fold(0, |byte, &slot| (byte << 1) | decode_bit(slot) as u8)
}
