//! Timer-driven index cycler behind carousels, word cycles, and scene
//! rotations. The machine never owns a thread: the host's frame loop calls
//! [`Rotation::poll_at`] with its clock, which keeps timed advancement
//! testable with synthetic instants.

use crate::progress::ease_out_cubic;
use std::time::{Duration, Instant};

/// Lifecycle phase of a rotation machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    /// Terminal: a disposed machine can never mutate again.
    Disposed,
}

/// Timer-driven `{ current_index, direction, total }` state. One pending
/// deadline exists per instance at any time; replacing the interval
/// replaces the deadline, so ticks can never overlap.
#[derive(Debug, Clone)]
pub struct Rotation {
    current: usize,
    direction: i8,
    total: usize,
    interval: Duration,
    phase: Phase,
    deadline: Option<Instant>,
    ticks: u64,
}

impl Rotation {
    /// An auto-starting machine, matching the page carousels: the first
    /// timed advance lands one interval after `now`.
    pub fn new(total: usize, interval: Duration, now: Instant) -> Self {
        let mut rotation = Self::idle(total, interval);
        rotation.start(now);
        rotation
    }

    /// A machine that stays idle until [`Rotation::start`].
    pub fn idle(total: usize, interval: Duration) -> Self {
        Self {
            current: 0,
            direction: 0,
            total,
            interval,
            phase: Phase::Idle,
            deadline: None,
            ticks: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Direction of the most recent index change: -1, 0 or +1.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of timed advances so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn start(&mut self, now: Instant) {
        if matches!(self.phase, Phase::Idle | Phase::Paused) && self.total > 0 {
            self.phase = Phase::Running;
            self.deadline = Some(now + self.interval);
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            self.deadline = None;
        }
    }

    /// Tear down the machine. Terminal; every later poll or control call is
    /// a no-op, so nothing can mutate state after disposal.
    pub fn dispose(&mut self) {
        self.phase = Phase::Disposed;
        self.deadline = None;
    }

    /// Replace the tick interval. The pending deadline is replaced along
    /// with it, never left to fire alongside the new one.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.interval = interval;
        if self.phase == Phase::Running {
            self.deadline = Some(now + interval);
        }
    }

    /// Timed advance, if the deadline has passed. Returns true when the
    /// index changed. The phase check comes first: disposed and paused
    /// machines never tick.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.advance_forward(now);
        self.ticks += 1;
        true
    }

    /// Manual advance; identical to a tick and resets the countdown.
    pub fn next(&mut self, now: Instant) {
        if self.phase == Phase::Disposed || self.total == 0 {
            return;
        }
        self.advance_forward(now);
    }

    pub fn prev(&mut self, now: Instant) {
        if self.phase == Phase::Disposed || self.total == 0 {
            return;
        }
        self.current = (self.current + self.total - 1) % self.total;
        self.direction = -1;
        self.reset_deadline(now);
    }

    /// Jump straight to `index`, recording the travel direction. Indices
    /// outside `[0, total)` are internally generated contract violations
    /// and are silently ignored.
    pub fn jump_to(&mut self, index: usize, now: Instant) {
        if self.phase == Phase::Disposed || index >= self.total {
            return;
        }
        self.direction = match index.cmp(&self.current) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        };
        self.current = index;
        self.reset_deadline(now);
    }

    fn advance_forward(&mut self, now: Instant) {
        self.current = (self.current + 1) % self.total;
        self.direction = 1;
        self.reset_deadline(now);
    }

    fn reset_deadline(&mut self, now: Instant) {
        if self.phase == Phase::Running {
            self.deadline = Some(now + self.interval);
        }
    }
}

/// Mirrored enter/exit offsets for a slide swap, selected by direction:
/// a positive direction slides the new slide in from the trailing edge and
/// the old one out through the leading edge; negative is the mirror image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransition {
    pub enter_from: f64,
    pub exit_to: f64,
}

impl SlideTransition {
    pub fn for_direction(direction: i8, span: f64) -> Self {
        if direction >= 0 {
            Self { enter_from: span, exit_to: -span }
        } else {
            Self { enter_from: -span, exit_to: span }
        }
    }

    /// Offset of the entering slide at eased transition progress `t`
    /// (0 = fully off-screen, 1 = centered).
    pub fn enter_offset(&self, t: f64) -> f64 {
        self.enter_from * (1.0 - ease_out_cubic(t.clamp(0.0, 1.0)))
    }

    /// Offset of the exiting slide at eased transition progress `t`.
    pub fn exit_offset(&self, t: f64) -> f64 {
        self.exit_to * ease_out_cubic(t.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(6000);

    fn machine(total: usize, now: Instant) -> Rotation {
        Rotation::new(total, INTERVAL, now)
    }

    #[test]
    fn auto_starts_running_at_index_zero() {
        let rotation = machine(4, Instant::now());
        assert_eq!(rotation.phase(), Phase::Running);
        assert_eq!(rotation.current_index(), 0);
        assert_eq!(rotation.direction(), 0);
    }

    #[test]
    fn timed_ticks_advance_modulo_total() {
        let start = Instant::now();
        let mut rotation = machine(3, start);

        assert!(!rotation.poll_at(start + Duration::from_millis(5999)));
        assert!(rotation.poll_at(start + INTERVAL));
        assert_eq!(rotation.current_index(), 1);
        assert_eq!(rotation.direction(), 1);

        // Each tick re-arms the deadline one interval ahead.
        assert!(!rotation.poll_at(start + INTERVAL + Duration::from_millis(10)));
        assert!(rotation.poll_at(start + INTERVAL * 2));
        assert!(rotation.poll_at(start + INTERVAL * 3));
        assert_eq!(rotation.current_index(), 0);
        assert_eq!(rotation.ticks(), 3);
    }

    #[test]
    fn next_wraps_and_resets_the_countdown() {
        let start = Instant::now();
        let mut rotation = machine(4, start);
        rotation.jump_to(3, start);

        let late = start + Duration::from_millis(5900);
        rotation.next(late);
        assert_eq!(rotation.current_index(), 0);
        assert_eq!(rotation.direction(), 1);

        // The manual advance pushed the deadline out from `late`.
        assert!(!rotation.poll_at(start + INTERVAL));
        assert!(rotation.poll_at(late + INTERVAL));
    }

    #[test]
    fn prev_from_zero_wraps_to_last() {
        let start = Instant::now();
        let mut rotation = machine(4, start);
        rotation.prev(start);
        assert_eq!(rotation.current_index(), 3);
        assert_eq!(rotation.direction(), -1);
    }

    #[test]
    fn out_of_range_jump_is_a_silent_no_op() {
        let start = Instant::now();
        let mut rotation = machine(4, start);
        rotation.jump_to(2, start);
        rotation.jump_to(4, start);
        assert_eq!(rotation.current_index(), 2);
        assert_eq!(rotation.direction(), 1);
    }

    #[test]
    fn jump_records_travel_direction() {
        let start = Instant::now();
        let mut rotation = machine(5, start);
        rotation.jump_to(3, start);
        assert_eq!(rotation.direction(), 1);
        rotation.jump_to(1, start);
        assert_eq!(rotation.direction(), -1);
        rotation.jump_to(1, start);
        assert_eq!(rotation.direction(), 0);
    }

    #[test]
    fn jump_to_last_then_next_wraps_to_zero() {
        let start = Instant::now();
        let mut rotation = machine(4, start);
        rotation.jump_to(3, start);
        rotation.next(start);
        assert_eq!(rotation.current_index(), 0);
    }

    #[test]
    fn pause_suspends_ticks_until_restarted() {
        let start = Instant::now();
        let mut rotation = machine(3, start);
        rotation.pause();
        assert_eq!(rotation.phase(), Phase::Paused);
        assert!(!rotation.poll_at(start + INTERVAL * 10));

        rotation.start(start + INTERVAL * 10);
        assert!(!rotation.poll_at(start + INTERVAL * 10 + Duration::from_millis(1)));
        assert!(rotation.poll_at(start + INTERVAL * 11));
    }

    #[test]
    fn disposal_stops_ticks_for_good() {
        let start = Instant::now();
        let mut rotation = machine(3, start);
        assert!(rotation.poll_at(start + INTERVAL));
        let ticks_before = rotation.ticks();

        rotation.dispose();
        for step in 1..50 {
            assert!(!rotation.poll_at(start + INTERVAL * (step + 1)));
        }
        assert_eq!(rotation.ticks(), ticks_before);
        assert_eq!(rotation.phase(), Phase::Disposed);

        // Manual controls and restarts are dead too.
        rotation.next(start + INTERVAL * 60);
        rotation.start(start + INTERVAL * 60);
        assert_eq!(rotation.current_index(), 1);
        assert_eq!(rotation.phase(), Phase::Disposed);
    }

    #[test]
    fn reconfiguring_the_interval_replaces_the_deadline() {
        let start = Instant::now();
        let mut rotation = machine(3, start);
        let midway = start + Duration::from_millis(3000);
        rotation.set_interval(Duration::from_millis(1000), midway);

        // The old 6 s deadline is gone; only the new one fires.
        assert!(!rotation.poll_at(midway + Duration::from_millis(999)));
        assert!(rotation.poll_at(midway + Duration::from_millis(1000)));
        assert_eq!(rotation.ticks(), 1);
    }

    #[test]
    fn empty_rotation_never_runs() {
        let mut rotation = Rotation::new(0, INTERVAL, Instant::now());
        assert_eq!(rotation.phase(), Phase::Idle);
        assert!(!rotation.poll_at(Instant::now() + INTERVAL * 2));
        rotation.next(Instant::now());
        assert_eq!(rotation.current_index(), 0);
    }

    #[test]
    fn slide_transitions_mirror_by_direction() {
        let forward = SlideTransition::for_direction(1, 1000.0);
        let backward = SlideTransition::for_direction(-1, 1000.0);
        assert_eq!(forward.enter_from, 1000.0);
        assert_eq!(forward.exit_to, -1000.0);
        assert_eq!(backward.enter_from, -1000.0);
        assert_eq!(backward.exit_to, 1000.0);

        assert_eq!(forward.enter_offset(0.0), 1000.0);
        assert_eq!(forward.enter_offset(1.0), 0.0);
        assert_eq!(forward.exit_offset(1.0), -1000.0);
    }
}
