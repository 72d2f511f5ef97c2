//! Frame pacing
//!
//! The simulation never sees measured time: every step advances the
//! configured `dt`. Pacing only decides *when* steps run.

/// Maximum wall-clock time credited per animation frame (seconds)
const MAX_FRAME_TIME: f64 = 0.1;

/// Turns animation-frame timestamps into a whole number of fixed steps.
///
/// Used on the web, where the loop cannot sleep between frames.
#[derive(Debug, Clone)]
pub struct StepClock {
    period: f64,
    accumulator: f64,
    max_steps: u32,
}

impl StepClock {
    pub fn new(frame_rate: f32, max_steps: u32) -> Self {
        Self {
            period: 1.0 / frame_rate as f64,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Credit `elapsed` seconds and return how many steps are now due
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= self.period && steps < self.max_steps {
            self.accumulator -= self.period;
            steps += 1;
        }
        // Drop whatever backlog the cap left behind
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.period);
        }
        steps
    }

    /// Forget accumulated time (after a pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Fixed-rate wakeup schedule for the native event loop
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: std::time::Duration,
    next: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl FramePacer {
    pub fn new(period: std::time::Duration) -> Self {
        Self {
            period,
            next: std::time::Instant::now() + period,
        }
    }

    /// When the next step is due
    pub fn deadline(&self) -> std::time::Instant {
        self.next
    }

    pub fn is_due(&self, now: std::time::Instant) -> bool {
        now >= self.next
    }

    /// Schedule the following frame. A late loop resynchronizes instead of
    /// bursting to catch up.
    pub fn advance(&mut self, now: std::time::Instant) {
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
    }

    /// Start counting frames from now
    pub fn restart(&mut self) {
        self.next = std::time::Instant::now() + self.period;
    }
}
