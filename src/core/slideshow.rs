use std::time::{Duration, Instant};

/// Rotating caption strip. Advances one slide per interval and wraps.
#[derive(Debug, Clone)]
pub struct Slideshow {
    slides: Vec<String>,
    index: usize,
    interval: Duration,
    last_advance: Instant,
}

impl Slideshow {
    pub fn new(slides: Vec<String>, interval: Duration, now: Instant) -> Self {
        Self {
            slides,
            index: 0,
            interval,
            last_advance: now,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.slides.get(self.index).map(String::as_str)
    }

    /// Advance for every full interval elapsed since the last advance.
    pub fn tick(&mut self, now: Instant) {
        if self.slides.is_empty() || self.interval.is_zero() {
            return;
        }
        while now.saturating_duration_since(self.last_advance) >= self.interval {
            self.index = (self.index + 1) % self.slides.len();
            self.last_advance += self.interval;
        }
    }
}
