//! Rolling Statistic
//!
//! Fixed-window mean and population standard deviation over a stream.
//!
//! Mean and the sum of squared deviations (M2) are maintained with a windowed
//! Welford update: a plain add while filling, then an add-and-evict in one step
//! once full. Each time the ring buffer wraps, both are recomputed from the
//! buffer so floating-point error cannot accumulate. Amortized cost is O(1).

use super::StreamingStat;
use crate::strategy::error::SignalError;
use crate::strategy::params::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct RollingStat {
    window: usize,
    buffer: Vec<f64>,
    head: usize,
    len: usize,
    mean: f64,
    m2: f64,
}

impl RollingStat {
    pub fn new(window: usize) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::InvalidWindow {
                name: "rolling window",
                value: window,
            });
        }
        Ok(Self {
            window,
            buffer: vec![0.0; window],
            head: 0,
            len: 0,
            mean: 0.0,
            m2: 0.0,
        })
    }

    /// Push a value, evicting the oldest once the window is full
    pub fn update(&mut self, value: f64) {
        if self.len < self.window {
            self.buffer[self.head] = value;
            self.len += 1;
            let delta = value - self.mean;
            self.mean += delta / self.len as f64;
            self.m2 += delta * (value - self.mean);
        } else {
            let evicted = self.buffer[self.head];
            self.buffer[self.head] = value;
            let prev_mean = self.mean;
            self.mean = prev_mean + (value - evicted) / self.window as f64;
            self.m2 += (value - evicted) * (value - self.mean + evicted - prev_mean);
        }

        self.head = (self.head + 1) % self.window;
        if self.head == 0 && self.len == self.window {
            self.resync();
        }
        if self.m2 < 0.0 {
            self.m2 = 0.0;
        }
    }

    /// Exact two-pass recomputation over the buffer
    fn resync(&mut self) {
        let n = self.len as f64;
        let mean = self.buffer.iter().sum::<f64>() / n;
        self.m2 = self.buffer.iter().map(|x| (x - mean) * (x - mean)).sum();
        self.mean = mean;
    }

    pub fn is_ready(&self) -> bool {
        self.len >= self.window
    }

    pub fn mean(&self) -> Result<f64, SignalError> {
        if !self.is_ready() {
            return Err(SignalError::NotReady("rolling statistic"));
        }
        Ok(self.mean)
    }

    /// Population variance (divides by the window length)
    pub fn variance(&self) -> Result<f64, SignalError> {
        if !self.is_ready() {
            return Err(SignalError::NotReady("rolling statistic"));
        }
        Ok(self.m2 / self.window as f64)
    }

    pub fn stdev(&self) -> Result<f64, SignalError> {
        self.variance().map(f64::sqrt)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Values currently held (saturates at the window length)
    pub fn count(&self) -> usize {
        self.len
    }

    pub fn reset(&mut self) {
        self.buffer.iter_mut().for_each(|v| *v = 0.0);
        self.head = 0;
        self.len = 0;
        self.mean = 0.0;
        self.m2 = 0.0;
    }
}

impl StreamingStat for RollingStat {
    fn update(&mut self, value: f64) {
        RollingStat::update(self, value)
    }

    fn is_ready(&self) -> bool {
        RollingStat::is_ready(self)
    }

    fn mean(&self) -> Result<f64, SignalError> {
        RollingStat::mean(self)
    }

    fn stdev(&self) -> Result<f64, SignalError> {
        RollingStat::stdev(self)
    }

    fn window(&self) -> usize {
        self.window
    }

    fn reset(&mut self) {
        RollingStat::reset(self)
    }
}
