//! Wall-clock pacing for the run loop.
//!
//! A pacer is told how many cycles each instruction took and may block the
//! thread to keep emulated time from running ahead of real time. It never
//! affects what the CPU does, only when.

use std::time::{Duration, Instant};

pub const DEFAULT_CPU_HZ: u64 = 1_000_000;

/// Sleeps shorter than this are deferred and folded into a later one.
pub const MIN_SLEEP: Duration = Duration::from_millis(1);

pub trait Pacer {
    fn advance(&mut self, cycles: u64);
    fn total_cycles(&self) -> u64;
}

/// Runs as fast as possible. Use for tests and headless batch runs.
#[derive(Debug, Default)]
pub struct Unpaced {
    total: u64,
}

impl Unpaced {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pacer for Unpaced {
    fn advance(&mut self, cycles: u64) {
        self.total += cycles;
    }

    fn total_cycles(&self) -> u64 {
        self.total
    }
}

#[derive(Debug)]
pub struct RealTimePacer {
    hz: u64,
    start: Instant,
    total: u64,
    slept: Duration,
}

impl RealTimePacer {
    /// `hz` of zero falls back to [`DEFAULT_CPU_HZ`].
    pub fn new(hz: u64) -> Self {
        let hz = if hz == 0 { DEFAULT_CPU_HZ } else { hz };
        RealTimePacer {
            hz,
            start: Instant::now(),
            total: 0,
            slept: Duration::ZERO,
        }
    }

    pub fn hz(&self) -> u64 {
        self.hz
    }

    /// Time spent blocked so far.
    pub fn slept(&self) -> Duration {
        self.slept
    }
}

impl Pacer for RealTimePacer {
    fn advance(&mut self, cycles: u64) {
        self.total += cycles;
        if let Some(wait) = shortfall(self.total, self.hz, self.start.elapsed()) {
            std::thread::sleep(wait);
            self.slept += wait;
        }
    }

    fn total_cycles(&self) -> u64 {
        self.total
    }
}

/// How far emulated time (`cycles / hz`) is ahead of `elapsed`, if by at
/// least [`MIN_SLEEP`].
pub fn shortfall(cycles: u64, hz: u64, elapsed: Duration) -> Option<Duration> {
    if hz == 0 {
        return None;
    }
    let nanos = (cycles as u128 * 1_000_000_000) / hz as u128;
    let emulated = Duration::from_nanos(nanos.min(u64::MAX as u128) as u64);
    emulated
        .checked_sub(elapsed)
        .filter(|wait| *wait >= MIN_SLEEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaced_counts_cycles() {
        let mut pacer = Unpaced::new();
        pacer.advance(7);
        pacer.advance(3);
        assert_eq!(pacer.total_cycles(), 10);
    }

    #[test]
    fn test_shortfall() {
        // 1 MHz: 5000 cycles are 5 ms of emulated time
        assert_eq!(
            shortfall(5_000, 1_000_000, Duration::from_millis(2)),
            Some(Duration::from_millis(3))
        );
        // Behind real time: no sleep
        assert_eq!(shortfall(1_000, 1_000_000, Duration::from_millis(2)), None);
        // Under a millisecond ahead: deferred
        assert_eq!(shortfall(1_500, 1_000_000, Duration::from_millis(1)), None);
        assert_eq!(shortfall(1, 0, Duration::ZERO), None);
    }

    #[test]
    fn test_realtime_pacer_sleeps_for_the_gap() {
        // 10 kHz: 200 cycles are 20 ms
        let mut pacer = RealTimePacer::new(10_000);
        let started = Instant::now();
        pacer.advance(200);
        assert!(started.elapsed() >= Duration::from_millis(15));
        assert_eq!(pacer.total_cycles(), 200);
        assert!(pacer.slept() > Duration::ZERO);
    }

    #[test]
    fn test_zero_hz_uses_default() {
        assert_eq!(RealTimePacer::new(0).hz(), DEFAULT_CPU_HZ);
    }
}
