use std::time::{Duration, Instant};

/// Caps how fast a caller pulls events, independent of the algorithm being run.
///
/// A rate of 0 means unthrottled: [`Throttle::wait`] returns immediately.
#[derive(Debug, Clone)]
pub struct Throttle {
    steps_per_second: u32,
    last_tick: Option<Instant>,
}

impl Throttle {
    pub const MIN_RATE: u32 = 1;
    pub const MAX_RATE: u32 = 10_000;

    pub fn new(steps_per_second: u32) -> Self {
        let steps_per_second = match steps_per_second {
            0 => 0,
            n => n.clamp(Throttle::MIN_RATE, Throttle::MAX_RATE),
        };
        Throttle {
            steps_per_second,
            last_tick: None,
        }
    }

    pub fn rate(&self) -> u32 {
        self.steps_per_second
    }

    pub fn is_unthrottled(&self) -> bool {
        self.steps_per_second == 0
    }

    /// Minimum time between two ticks, or `None` when unthrottled.
    pub fn interval(&self) -> Option<Duration> {
        match self.steps_per_second {
            0 => None,
            n => Some(Duration::from_secs(1) / n),
        }
    }

    /// Doubles the rate, up to `MAX_RATE`. No effect when unthrottled.
    pub fn speed_up(&mut self) {
        if !self.is_unthrottled() {
            self.steps_per_second = self
                .steps_per_second
                .saturating_mul(2)
                .min(Throttle::MAX_RATE);
        }
    }

    /// Halves the rate, down to `MIN_RATE`. No effect when unthrottled.
    pub fn slow_down(&mut self) {
        if !self.is_unthrottled() {
            self.steps_per_second = (self.steps_per_second / 2).max(Throttle::MIN_RATE);
        }
    }

    /// Sleeps just long enough that ticks are at least one interval apart.
    pub fn wait(&mut self) {
        let Some(interval) = self.interval() else {
            return;
        };
        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
        self.last_tick = Some(Instant::now());
    }
}
