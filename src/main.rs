mod alarm;
mod blink;
mod ui;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, ValueEnum};

use crate::alarm::config::{AlarmInput, AlarmMode, AlarmTarget, BlinkInterval, Rgb};
use crate::alarm::scheduler::delay_until;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    Time,
    Countdown,
}

impl From<CliMode> for AlarmMode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Time => AlarmMode::AbsoluteTime,
            CliMode::Countdown => AlarmMode::CountdownSeconds,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliInterval {
    #[value(name = "1000")]
    Ms1000,
    #[value(name = "2000")]
    Ms2000,
    #[value(name = "3000")]
    Ms3000,
    #[value(name = "4000")]
    Ms4000,
    #[value(name = "5000")]
    Ms5000,
}

impl From<CliInterval> for BlinkInterval {
    fn from(value: CliInterval) -> Self {
        match value {
            CliInterval::Ms1000 => BlinkInterval::Ms1000,
            CliInterval::Ms2000 => BlinkInterval::Ms2000,
            CliInterval::Ms3000 => BlinkInterval::Ms3000,
            CliInterval::Ms4000 => BlinkInterval::Ms4000,
            CliInterval::Ms5000 => BlinkInterval::Ms5000,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "blinkalarm",
    version,
    about = "One-shot alarm that blinks an alert window until stopped"
)]
struct Cli {
    /// Pre-selected alarm mode for the settings form
    #[arg(long, value_enum, default_value_t = CliMode::Time)]
    mode: CliMode,

    /// Pre-filled absolute alarm time (HH:MM:SS, 24-hour)
    #[arg(long, default_value = "00:00:00")]
    time: String,

    /// Pre-filled countdown in whole seconds
    #[arg(long, default_value = "0")]
    seconds: String,

    /// Blink color as R,G,B (0-255 each)
    #[arg(long, default_value = "255,0,0", value_parser = parse_rgb)]
    color: Rgb,

    /// Blink period in milliseconds
    #[arg(long, value_enum, default_value_t = CliInterval::Ms1000)]
    interval: CliInterval,

    /// Validate the inputs and print the computed delay without opening a
    /// window
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn to_alarm_input(&self) -> AlarmInput {
        AlarmInput {
            mode: self.mode.into(),
            time_text: self.time.clone(),
            seconds_text: self.seconds.clone(),
            color: self.color,
            interval: self.interval.into(),
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let input = cli.to_alarm_input();

    if cli.check {
        run_check(&input)?;
        return Ok(());
    }

    ui::app::run_gui(input)
}

fn run_check(input: &AlarmInput) -> Result<()> {
    let config = input.validate()?;
    let now = Local::now();
    let delay = delay_until(config.target, now.time());

    println!("blinkalarm input check");
    match config.target {
        AlarmTarget::TimeOfDay(time) => println!("Mode: on time at {}", time.format("%H:%M:%S")),
        AlarmTarget::CountdownSeconds(seconds) => println!("Mode: countdown of {seconds} s"),
    }
    println!("Computed delay: {} ms", delay.num_milliseconds());
    println!("Fires at: {}", (now + delay).format("%H:%M:%S"));
    println!(
        "Blink color: {}, {}, {}",
        config.color.r, config.color.g, config.color.b
    );
    println!("Blink interval: {} ms", config.interval.millis());
    Ok(())
}

fn parse_rgb(input: &str) -> Result<Rgb, String> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected R,G,B, got '{input}'"));
    };
    let parse = |text: &str| {
        text.parse::<u8>()
            .map_err(|_| format!("color component '{text}' is not in 0-255"))
    };
    Ok(Rgb::new(parse(r)?, parse(g)?, parse(b)?))
}
