/// Bus condition reported by a reset/presence-detect cycle.
pub trait OneWireStatus {
    /// Whether a presence pulse was seen after the reset pulse.
    fn presence(&self) -> bool;

    /// Whether the bus was found held low, i.e. shorted.
    fn shortcircuit(&self) -> bool;
}
