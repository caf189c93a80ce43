use std::time::Duration;

/// How much work is owed after some wall time has passed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ticks {
    pub steps: u32,
    pub timer_ticks: u32,
}

/// # Clock
/// Converts elapsed wall time into instruction steps and timer ticks.
///
/// The two cadences are independent: the CPU runs at whatever speed is
/// configured while the timers always count down at their own rate.
/// Leftover time that doesn't add up to a whole period is carried over.
#[derive(Debug, Clone)]
pub struct Clock {
    step_period: Duration,
    timer_period: Duration,
    step_elapsed: Duration,
    timer_elapsed: Duration,
}

impl Clock {
    /// # Arguments
    /// * `instructions_per_second` CPU speed
    /// * `timer_frequency` how often the timers count down, in Hz
    pub fn new(instructions_per_second: u32, timer_frequency: u32) -> Self {
        Clock {
            step_period: period(instructions_per_second),
            timer_period: period(timer_frequency),
            step_elapsed: Duration::ZERO,
            timer_elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) -> Ticks {
        Ticks {
            steps: whole_periods(&mut self.step_elapsed, elapsed, self.step_period),
            timer_ticks: whole_periods(&mut self.timer_elapsed, elapsed, self.timer_period),
        }
    }
}

/// Fastest rate a period can represent; one period per nanosecond.
const MAX_FREQUENCY: u32 = 1_000_000_000;

// never zero, so whole_periods can divide by it
fn period(hz: u32) -> Duration {
    Duration::from_nanos(u64::from(MAX_FREQUENCY / hz.clamp(1, MAX_FREQUENCY)))
}

fn whole_periods(accumulated: &mut Duration, elapsed: Duration, period: Duration) -> u32 {
    *accumulated += elapsed;
    let count = (accumulated.as_nanos() / period.as_nanos()) as u32;
    *accumulated -= period * count;
    count
}
