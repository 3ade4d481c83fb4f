use std::time::{Duration, Instant};

use crate::alarm::config::{BlinkInterval, Rgb};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    White,
    Colored,
}

#[derive(Debug)]
enum BlinkState {
    Inactive,
    Active {
        phase: Phase,
        color: Rgb,
        period: Duration,
        next_toggle: Instant,
    },
}

/// Alternates the alert surface between white and the configured color until
/// stopped. Driven by the UI event loop calling `tick`.
pub struct BlinkController {
    state: BlinkState,
}

impl BlinkController {
    pub fn new() -> Self {
        Self {
            state: BlinkState::Inactive,
        }
    }

    /// Starts blinking: the white phase is shown immediately, the first flip
    /// happens one period later.
    pub fn start(&mut self, color: Rgb, interval: BlinkInterval, now: Instant) {
        let period = Duration::from_millis(interval.millis());
        self.state = BlinkState::Active {
            phase: Phase::White,
            color,
            period,
            next_toggle: now + period,
        };
    }

    /// Flips the phase for every period elapsed since the last tick, so a late
    /// tick catches up without losing parity. Returns the number of flips.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let BlinkState::Active {
            phase,
            period,
            next_toggle,
            ..
        } = &mut self.state
        else {
            return 0;
        };

        let mut flips = 0;
        while now >= *next_toggle {
            *phase = match phase {
                Phase::White => Phase::Colored,
                Phase::Colored => Phase::White,
            };
            *next_toggle += *period;
            flips += 1;
        }
        flips
    }

    /// Idempotent. Safe to call when never started or already stopped.
    pub fn stop(&mut self) {
        self.state = BlinkState::Inactive;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, BlinkState::Active { .. })
    }

    pub fn phase(&self) -> Option<Phase> {
        match &self.state {
            BlinkState::Active { phase, .. } => Some(*phase),
            BlinkState::Inactive => None,
        }
    }

    /// The color the alert surface should show right now.
    pub fn displayed_color(&self) -> Option<Rgb> {
        match &self.state {
            BlinkState::Active {
                phase: Phase::White,
                ..
            } => Some(Rgb::WHITE),
            BlinkState::Active { color, .. } => Some(*color),
            BlinkState::Inactive => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.state {
            BlinkState::Active { next_toggle, .. } => Some(*next_toggle),
            BlinkState::Inactive => None,
        }
    }
}

impl Default for BlinkController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(1_000);

    fn started(now: Instant) -> BlinkController {
        let mut blink = BlinkController::new();
        blink.start(Rgb::RED, BlinkInterval::Ms1000, now);
        blink
    }

    #[test]
    fn shows_white_immediately_on_start() {
        let blink = started(Instant::now());
        assert!(blink.is_active());
        assert_eq!(blink.phase(), Some(Phase::White));
        assert_eq!(blink.displayed_color(), Some(Rgb::WHITE));
    }

    #[test]
    fn tick_before_deadline_does_not_flip() {
        let now = Instant::now();
        let mut blink = started(now);
        assert_eq!(blink.tick(now + PERIOD / 2), 0);
        assert_eq!(blink.phase(), Some(Phase::White));
    }

    #[test]
    fn displayed_color_alternates_with_tick_parity() {
        let now = Instant::now();
        let mut blink = started(now);

        for k in 1..=6u32 {
            blink.tick(now + PERIOD * k);
            let expected = if k % 2 == 0 { Rgb::WHITE } else { Rgb::RED };
            assert_eq!(blink.displayed_color(), Some(expected), "after {k} ticks");
        }
    }

    #[test]
    fn late_tick_catches_up_and_keeps_parity() {
        let now = Instant::now();
        let mut blink = started(now);

        // Three periods elapsed at once: odd number of flips, colored phase.
        assert_eq!(blink.tick(now + PERIOD * 3), 3);
        assert_eq!(blink.phase(), Some(Phase::Colored));

        assert_eq!(blink.tick(now + PERIOD * 4), 1);
        assert_eq!(blink.phase(), Some(Phase::White));
    }

    #[test]
    fn stop_is_idempotent() {
        let now = Instant::now();
        let mut blink = started(now);
        blink.tick(now + PERIOD);

        blink.stop();
        assert!(!blink.is_active());
        assert_eq!(blink.displayed_color(), None);

        blink.stop();
        assert!(!blink.is_active());

        // Never-started controller tolerates stop and tick too.
        let mut fresh = BlinkController::new();
        fresh.stop();
        assert_eq!(fresh.tick(Instant::now()), 0);
        assert!(!fresh.is_active());
    }

    #[test]
    fn restart_after_stop_begins_in_white_phase() {
        let now = Instant::now();
        let mut blink = started(now);
        blink.tick(now + PERIOD);
        assert_eq!(blink.phase(), Some(Phase::Colored));

        blink.stop();
        blink.start(Rgb::new(0, 128, 255), BlinkInterval::Ms2000, now);
        assert_eq!(blink.phase(), Some(Phase::White));
        blink.tick(now + Duration::from_millis(2_000));
        assert_eq!(blink.displayed_color(), Some(Rgb::new(0, 128, 255)));
    }
}
