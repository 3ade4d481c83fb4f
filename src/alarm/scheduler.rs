use chrono::{DateTime, Local, NaiveTime, TimeDelta};

use crate::alarm::config::{
    AlarmConfig, AlarmInput, AlarmTarget, BlinkInterval, Rgb, ValidationError,
};

/// Overall alarm lifecycle. Exactly one instance exists per application run;
/// transitions are driven only by user actions and the fire deadline passing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlarmState {
    Idle,
    Armed {
        config: AlarmConfig,
        fire_at: DateTime<Local>,
    },
    Blinking,
}

pub struct AlarmScheduler {
    state: AlarmState,
}

impl AlarmScheduler {
    pub fn new() -> Self {
        Self {
            state: AlarmState::Idle,
        }
    }

    /// Validates the input, computes the fire time and arms the alarm.
    /// Validation failures leave the state untouched.
    pub fn start(
        &mut self,
        input: &AlarmInput,
        now: DateTime<Local>,
    ) -> Result<DateTime<Local>, ValidationError> {
        let config = input.validate()?;
        // Whole milliseconds only, truncated toward zero.
        let delay =
            TimeDelta::milliseconds(delay_until(config.target, now.time()).num_milliseconds());
        let fire_at = now + delay;
        self.state = AlarmState::Armed { config, fire_at };
        Ok(fire_at)
    }

    /// Fires the alarm once its deadline has passed. Yields the blink settings
    /// exactly once, on the tick that transitions `Armed` to `Blinking`.
    pub fn tick(&mut self, now: DateTime<Local>) -> Option<(Rgb, BlinkInterval)> {
        let AlarmState::Armed { config, fire_at } = &self.state else {
            return None;
        };
        if now < *fire_at {
            return None;
        }
        let fired = (config.color, config.interval);
        self.state = AlarmState::Blinking;
        Some(fired)
    }

    /// Idempotent. A pending alarm is dropped; a fired one is simply reset.
    pub fn cancel(&mut self) {
        self.state = AlarmState::Idle;
    }

    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    /// Configuration controls are enabled iff the scheduler is idle.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, AlarmState::Idle)
    }

    pub fn remaining(&self, now: DateTime<Local>) -> Option<TimeDelta> {
        let AlarmState::Armed { fire_at, .. } = &self.state else {
            return None;
        };
        Some((*fire_at - now).max(TimeDelta::zero()))
    }
}

impl Default for AlarmScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Delay until the alarm should fire, taken from `now` as a time-of-day.
/// An absolute target that has already passed today means its next occurrence
/// tomorrow, so a negative delta wraps by 24 hours. The result is always in
/// `[0, 24h)` for absolute targets.
pub fn delay_until(target: AlarmTarget, now: NaiveTime) -> TimeDelta {
    match target {
        AlarmTarget::TimeOfDay(time) => {
            let delta = time.signed_duration_since(now);
            if delta < TimeDelta::zero() {
                delta + TimeDelta::days(1)
            } else {
                delta
            }
        }
        AlarmTarget::CountdownSeconds(seconds) => TimeDelta::seconds(i64::from(seconds)),
    }
}
