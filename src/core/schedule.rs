use std::cell::Cell;
use std::time::Duration;

/// Monotonic time source in seconds.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Clock driven by hand; used to feed synthetic time into the loops.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self {
            now: Cell::new(start_secs),
        }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

/// Which host callback source drives a ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    /// Once per rendered frame (requestAnimationFrame).
    EveryFrame,
    /// Fixed wall-clock period (setInterval).
    Interval(Duration),
}

impl Cadence {
    pub fn interval_ms(&self) -> Option<i32> {
        match self {
            Cadence::EveryFrame => None,
            Cadence::Interval(d) => Some(d.as_millis().min(i32::MAX as u128) as i32),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopPhase {
    Idle,
    Running { started_at: f64 },
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub index: u64,
    /// Seconds since `start`.
    pub elapsed: f64,
    /// Seconds since the previous tick (zero on the first).
    pub delta: f64,
}

/// Start/cancel state of one recurring loop.
///
/// The host driver calls [`Ticker::tick`] from its callback and stops
/// rescheduling once it returns `None`.
#[derive(Debug)]
pub struct Ticker {
    cadence: Cadence,
    phase: LoopPhase,
    last: f64,
    count: u64,
}

impl Ticker {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            phase: LoopPhase::Idle,
            last: 0.0,
            count: 0,
        }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, LoopPhase::Running { .. })
    }

    /// Begin ticking at `now`. Returns false if already running.
    pub fn start(&mut self, now: f64) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = LoopPhase::Running { started_at: now };
        self.last = now;
        self.count = 0;
        true
    }

    /// Stop ticking. Returns true if the ticker was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        self.phase = LoopPhase::Cancelled;
        was_running
    }

    pub fn tick(&mut self, now: f64) -> Option<Tick> {
        let LoopPhase::Running { started_at } = self.phase else {
            return None;
        };
        let tick = Tick {
            index: self.count,
            elapsed: (now - started_at).max(0.0),
            delta: (now - self.last).max(0.0),
        };
        self.last = now;
        self.count += 1;
        Some(tick)
    }
}
