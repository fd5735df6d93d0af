use embassy_time::Instant;

/// Monotonic time source used for the reset threshold and bounded waits.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
