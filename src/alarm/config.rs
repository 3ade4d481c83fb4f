use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid time format (use HH:MM:SS)")]
    BadFormat,
    #[error("please enter a valid non-negative number")]
    NotANonNegativeInteger,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlarmMode {
    AbsoluteTime,
    CountdownSeconds,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlarmTarget {
    TimeOfDay(NaiveTime),
    CountdownSeconds(u32),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub const fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// The fixed set of blink periods offered in the speed selector.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BlinkInterval {
    Ms1000,
    Ms2000,
    Ms3000,
    Ms4000,
    Ms5000,
}

impl BlinkInterval {
    pub const ALL: [BlinkInterval; 5] = [
        BlinkInterval::Ms1000,
        BlinkInterval::Ms2000,
        BlinkInterval::Ms3000,
        BlinkInterval::Ms4000,
        BlinkInterval::Ms5000,
    ];

    pub const fn millis(self) -> u64 {
        match self {
            BlinkInterval::Ms1000 => 1_000,
            BlinkInterval::Ms2000 => 2_000,
            BlinkInterval::Ms3000 => 3_000,
            BlinkInterval::Ms4000 => 4_000,
            BlinkInterval::Ms5000 => 5_000,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BlinkInterval::Ms1000 => "1000 ms",
            BlinkInterval::Ms2000 => "2000 ms",
            BlinkInterval::Ms3000 => "3000 ms",
            BlinkInterval::Ms4000 => "4000 ms",
            BlinkInterval::Ms5000 => "5000 ms",
        }
    }
}

/// Raw user input as typed into the settings form. Validation happens when the
/// alarm is started, not while editing.
#[derive(Debug, Clone)]
pub struct AlarmInput {
    pub mode: AlarmMode,
    pub time_text: String,
    pub seconds_text: String,
    pub color: Rgb,
    pub interval: BlinkInterval,
}

impl AlarmInput {
    pub fn validate(&self) -> Result<AlarmConfig, ValidationError> {
        let target = match self.mode {
            AlarmMode::AbsoluteTime => AlarmTarget::TimeOfDay(parse_time_of_day(&self.time_text)?),
            AlarmMode::CountdownSeconds => {
                AlarmTarget::CountdownSeconds(parse_countdown_seconds(&self.seconds_text)?)
            }
        };
        Ok(AlarmConfig {
            target,
            color: self.color,
            interval: self.interval,
        })
    }
}

/// Validated settings for one armed alarm. Immutable once armed; discarded
/// when the alarm is stopped or fires.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AlarmConfig {
    pub target: AlarmTarget,
    pub color: Rgb,
    pub interval: BlinkInterval,
}

pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M:%S").map_err(|_| ValidationError::BadFormat)
}

pub fn parse_countdown_seconds(input: &str) -> Result<u32, ValidationError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::NotANonNegativeInteger)
}
