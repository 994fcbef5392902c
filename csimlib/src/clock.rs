/// Logical time used to order line usage for LRU
///
/// Starts at 0, which is also the `last_used` value of a line that has never been filled, and only
/// ever moves forward, so every stamp it hands out is strictly newer than an empty line
#[derive(Debug, Default, Clone)]
pub struct RecencyClock {
    time: u64,
}

impl RecencyClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by one and returns the new time
    #[inline]
    pub fn tick(&mut self) -> u64 {
        self.time += 1;
        self.time
    }

    /// The current time, without advancing
    #[inline]
    pub fn now(&self) -> u64 {
        self.time
    }
}
