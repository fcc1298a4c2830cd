//! Tick scheduling
//!
//! Effects never assume a global animation loop. The host hands each effect a
//! [`Scheduler`] and delivers [`Tick`]s back to it; every tick carries the
//! [`TickHandle`] it was scheduled under. Handles are generational, so a
//! cancelled handle never compares equal to a later one and an effect can drop
//! any tick that was already in flight when it stopped.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

new_key_type! {
    /// Handle to a scheduled frame request or interval
    pub struct TickHandle;
}

/// Smallest interval period the scheduler honors, in milliseconds
pub const MIN_INTERVAL_MS: f64 = 1.0;

/// A fired frame or interval occurrence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub handle: TickHandle,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
}

/// Host scheduling collaborator
pub trait Scheduler {
    /// Request a single callback on the next frame
    fn request_frame(&mut self) -> TickHandle;

    /// Start a periodic callback every `period_ms`
    fn set_interval(&mut self, period_ms: f64) -> TickHandle;

    /// Cancel a frame request or interval. Unknown handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Shared scheduler handle, one per effect instance
///
/// Effects call through the handle from their own methods and from `Drop`,
/// so the host must not hold a borrow of the scheduler while calling into an
/// effect or dropping one.
impl<S: Scheduler> Scheduler for Rc<RefCell<S>> {
    fn request_frame(&mut self) -> TickHandle {
        self.borrow_mut().request_frame()
    }

    fn set_interval(&mut self, period_ms: f64) -> TickHandle {
        self.borrow_mut().set_interval(period_ms)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.borrow_mut().cancel(handle);
    }
}

/// Monotonic timestamp source in milliseconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`], counting from construction
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy, Debug)]
enum TimerKind {
    Frame,
    Interval { period_ms: f64 },
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    kind: TimerKind,
    next_fire: f64,
}

/// Deterministic scheduler advanced explicitly by the host
///
/// Frame requests are one-shot and fire on the next [`advance_to`] call.
/// Intervals fire once per elapsed period, so a large jump in time yields
/// every missed occurrence in timestamp order.
///
/// [`advance_to`]: ManualScheduler::advance_to
pub struct ManualScheduler {
    timers: SlotMap<TickHandle, Timer>,
    now: f64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    pub fn starting_at(now: f64) -> Self {
        Self {
            timers: SlotMap::with_key(),
            now,
        }
    }

    /// Check whether a handle is still scheduled
    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.timers.contains_key(handle)
    }

    /// Number of scheduled frame requests and intervals
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Advance time and collect every tick that came due
    ///
    /// Time never moves backwards; an earlier `now` is treated as the current
    /// time.
    pub fn advance_to(&mut self, now: f64) -> Vec<Tick> {
        self.now = self.now.max(now);
        let now = self.now;

        let mut ticks = Vec::new();
        let mut fired_frames = Vec::new();

        for (handle, timer) in self.timers.iter_mut() {
            match timer.kind {
                TimerKind::Interval { period_ms } => {
                    while timer.next_fire <= now {
                        ticks.push(Tick {
                            handle,
                            timestamp: timer.next_fire,
                        });
                        timer.next_fire += period_ms;
                    }
                }
                TimerKind::Frame => {
                    ticks.push(Tick {
                        handle,
                        timestamp: now,
                    });
                    fired_frames.push(handle);
                }
            }
        }

        for handle in fired_frames {
            self.timers.remove(handle);
        }

        ticks.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        tracing::trace!(now, fired = ticks.len(), "scheduler advanced");
        ticks
    }

    /// Advance by a delta in milliseconds
    pub fn advance_by(&mut self, dt_ms: f64) -> Vec<Tick> {
        let target = self.now + dt_ms.max(0.0);
        self.advance_to(target)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> f64 {
        self.now
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> TickHandle {
        self.timers.insert(Timer {
            kind: TimerKind::Frame,
            next_fire: self.now,
        })
    }

    fn set_interval(&mut self, period_ms: f64) -> TickHandle {
        // NaN fails the comparison and is clamped too
        let period_ms = if period_ms >= MIN_INTERVAL_MS {
            period_ms
        } else {
            MIN_INTERVAL_MS
        };
        self.timers.insert(Timer {
            kind: TimerKind::Interval { period_ms },
            next_fire: self.now + period_ms,
        })
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.timers.remove(handle);
    }
}
