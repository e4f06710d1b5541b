//! Time-of-day greeting and date line.

use chrono::{DateTime, TimeZone, Timelike};

pub fn part_of_day(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        18..=21 => "Good Evening",
        _ => "Good Night",
    }
}

pub fn greeting(hour: u32) -> String {
    format!("Assalamu'alaikum ({})", part_of_day(hour))
}

/// e.g. `Friday, October 16, 2026, 09:05 AM`
pub fn format_date_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %-d, %Y, %I:%M %p").to_string()
}

pub fn run_greet() {
    let now = chrono::Local::now();
    println!("{}", greeting(now.hour()));
    println!("{}", format_date_time(&now));
}
