//! Emulator settings.
//!
//! [`EmulatorConfig`] gathers the knobs the run loop and the CPU reset need.
//! With the `serde` feature it can be read from any serde format.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cpu::RESET_PC;

/// Default emulated clock rate in Hz.
pub const DEFAULT_CLOCK_HZ: u32 = 50_000;

/// Memory cell refreshed with a random byte every clock tick.
pub const RNG_CELL: u16 = 0x00FE;

/// Memory cell the presentation side writes key codes into.
pub const KEY_CELL: u16 = 0x00FF;

/// Settings for a CPU run.
///
/// # Examples
///
/// ```
/// use sim6502::EmulatorConfig;
///
/// let config = EmulatorConfig::default().with_clock_hz(1_000_000).with_seed(7);
/// assert_eq!(config.clock_hz, 1_000_000);
/// assert_eq!(config.entry_point, 0x0600);
/// assert_eq!(config.rng_seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmulatorConfig {
    /// Emulated clock rate. Zero disables rate limiting.
    pub clock_hz: u32,

    /// PC after reset.
    pub entry_point: u16,

    /// Address that receives a random byte each tick.
    pub rng_cell: u16,

    /// Address that receives key codes.
    pub key_cell: u16,

    /// Fixed RNG seed for reproducible runs; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            entry_point: RESET_PC,
            rng_cell: RNG_CELL,
            key_cell: KEY_CELL,
            rng_seed: None,
        }
    }
}

impl EmulatorConfig {
    pub fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    pub fn with_entry_point(mut self, entry_point: u16) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn with_rng_cell(mut self, rng_cell: u16) -> Self {
        self.rng_cell = rng_cell;
        self
    }

    pub fn with_key_cell(mut self, key_cell: u16) -> Self {
        self.key_cell = key_cell;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Length of one clock tick, or `None` when rate limiting is off.
    pub fn clock_period(&self) -> Option<std::time::Duration> {
        (self.clock_hz > 0).then(|| std::time::Duration::from_nanos(1_000_000_000 / self.clock_hz as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EmulatorConfig::default();
        assert_eq!(config.clock_hz, 50_000);
        assert_eq!(config.rng_cell, 0x00FE);
        assert_eq!(config.key_cell, 0x00FF);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_clock_period() {
        let config = EmulatorConfig::default();
        assert_eq!(config.clock_period(), Some(std::time::Duration::from_micros(20)));
        assert_eq!(config.with_clock_hz(0).clock_period(), None);
    }
}
