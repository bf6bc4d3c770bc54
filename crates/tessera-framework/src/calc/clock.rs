//! World tick to wall-clock conversion.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, Time};

/// Ticks in one day cycle.
pub const TICKS_PER_DAY: i64 = 24_000;

const SECONDS_PER_DAY: i64 = 86_400;
/// Tick 0 is sunrise, six in the morning.
const DAY_START: i64 = 6 * 3_600;

const TWENTY_FOUR: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const TWELVE: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");

/// Clock style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockFormat {
    /// `HH:MM`
    TwentyFourHour,
    /// `h:MM AM`
    TwelveHour,
}

/// Wall-clock time of a world tick count.
pub fn clock_time(ticks: i64) -> Time {
    // One tick is 3.6 seconds of in-game time.
    let seconds = ticks.rem_euclid(TICKS_PER_DAY) * 18 / 5;
    let seconds = (seconds + DAY_START) % SECONDS_PER_DAY;
    Time::MIDNIGHT + Duration::seconds(seconds)
}

/// Renders `ticks` as a clock reading.
pub fn format_ticks(ticks: i64, format: ClockFormat) -> String {
    let description = match format {
        ClockFormat::TwentyFourHour => TWENTY_FOUR,
        ClockFormat::TwelveHour => TWELVE,
    };
    clock_time(ticks).format(description).unwrap_or_default()
}
