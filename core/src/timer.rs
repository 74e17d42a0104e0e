use web_time::Instant;

/// Whole seconds since the first reveal, advanced by an external tick.
///
/// The tracker only stores the start instant and the last computed value.
/// After [`ElapsedTimer::stop`] ticks are ignored and the value stays frozen.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ElapsedTimer {
    started_at: Option<Instant>,
    elapsed_secs: u32,
    stopped: bool,
}

impl ElapsedTimer {
    pub const fn new() -> Self {
        Self {
            started_at: None,
            elapsed_secs: 0,
            stopped: false,
        }
    }

    /// Records the start instant, later calls keep the first one.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            log::debug!("timer started");
            self.started_at = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn tick(&mut self, now: Instant) {
        if self.stopped {
            return;
        }
        if let Some(started_at) = self.started_at {
            let secs = now.saturating_duration_since(started_at).as_secs();
            self.elapsed_secs = u32::try_from(secs).unwrap_or(u32::MAX);
        }
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }
}
