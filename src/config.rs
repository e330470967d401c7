//! Construction parameters for `ChainedHashMap`.

use crate::error::ConfigError;

/// Bucket count used when none is given.
pub const DEFAULT_CAPACITY: usize = 16;
/// Fill fraction used when none is given.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Initial capacity and load factor of a table.
///
/// The load factor is fixed for the lifetime of the table; the capacity is
/// only the starting point and doubles as the table grows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Check the parameters. A valid config has a positive capacity and a
    /// load factor in (0, 1].
    ///
    /// A config whose growth threshold floors to zero (capacity 1 with load
    /// factor 0.75, say) is valid. Such a table never grows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.initial_capacity));
        }
        // Written so that NaN fails too.
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }

    /// Threshold for the initial capacity.
    pub fn growth_threshold(&self) -> usize {
        growth_threshold(self.initial_capacity, self.load_factor)
    }
}

/// floor(capacity * load_factor).
pub(crate) fn growth_threshold(capacity: usize, load_factor: f64) -> usize {
    (capacity as f64 * load_factor).floor() as usize
}
