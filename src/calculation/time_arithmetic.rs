//! Minute-based time arithmetic shared by both calculators.
//!
//! Every function here is pure and works on already-parsed values.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ClockTime, MINUTES_PER_DAY, Minutes, NightWindow};

/// Minutes from a start punch to an end punch.
///
/// A negative difference means the end happened on the following day, so one
/// day is added once. This models a single overnight shift; spans longer than
/// a day are left for validation to reject.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::elapsed;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let next = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
///
/// // Same day
/// assert_eq!(elapsed(day, "08:00".parse().unwrap(), day, "17:30".parse().unwrap()).get(), 570);
/// // Exit date given explicitly
/// assert_eq!(elapsed(day, "23:00".parse().unwrap(), next, "07:00".parse().unwrap()).get(), 480);
/// // Exit date left on the entry day: rolled over
/// assert_eq!(elapsed(day, "23:00".parse().unwrap(), day, "07:00".parse().unwrap()).get(), 480);
/// ```
pub fn elapsed(
    start_date: NaiveDate,
    start_time: ClockTime,
    end_date: NaiveDate,
    end_time: ClockTime,
) -> Minutes {
    let days = (end_date - start_date).num_days();
    let mut minutes = days * MINUTES_PER_DAY + end_time.minutes_since_midnight()
        - start_time.minutes_since_midnight();

    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }

    Minutes::new(minutes)
}

/// Minutes between two clock times on a single 24h dial (end before start wraps).
pub fn clock_span(start: ClockTime, end: ClockTime) -> Minutes {
    let mut minutes = end.minutes_since_midnight() - start.minutes_since_midnight();
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    Minutes::new(minutes)
}

/// Gross time minus lunch, never negative.
pub fn subtract_lunch(gross: Minutes, lunch: Minutes) -> Minutes {
    (gross - lunch).floor_zero()
}

/// Time beyond `baseline`, never negative.
pub fn excess_over(worked: Minutes, baseline: Minutes) -> Minutes {
    (worked - baseline).floor_zero()
}

/// Minutes of `[start, start + span)` inside the night window that opens on
/// the entry day.
///
/// The shift is laid on a timeline that starts at midnight of the entry day.
/// Only the window beginning that evening counts, so the early-morning tail
/// of the previous night is not night time for a shift entered after
/// midnight.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::night_minutes;
/// use timesheet_engine::models::{Minutes, NightWindow};
///
/// let window = NightWindow::default();
///
/// // 23:00 to 07:00: 23:00-05:00 is night
/// assert_eq!(night_minutes("23:00".parse().unwrap(), Minutes::new(480), window).get(), 360);
/// // 03:00 to 09:00: before the entry day's window opens
/// assert_eq!(night_minutes("03:00".parse().unwrap(), Minutes::new(360), window).get(), 0);
/// // 08:00 to 17:00: none
/// assert_eq!(night_minutes("08:00".parse().unwrap(), Minutes::new(540), window).get(), 0);
/// ```
pub fn night_minutes(start: ClockTime, span: Minutes, window: NightWindow) -> Minutes {
    if span <= Minutes::ZERO {
        return Minutes::ZERO;
    }

    let shift_start = start.minutes_since_midnight();
    let shift_end = shift_start + span.get();
    let window_start = window.start.minutes_since_midnight();
    let window_end = window_start + window.length().get();

    Minutes::new((shift_end.min(window_end) - shift_start.max(window_start)).max(0))
}

/// Minutes of `[start, start + span)` inside any daily occurrence of the
/// night window, including the previous night's early-morning tail.
///
/// Used to classify a shift as a night shift, not to price it.
///
/// ```
/// use timesheet_engine::calculation::daily_night_minutes;
/// use timesheet_engine::models::{Minutes, NightWindow};
///
/// let window = NightWindow::default();
///
/// // 03:00 to 09:00: 03:00-05:00 falls in the previous night's window
/// assert_eq!(daily_night_minutes("03:00".parse().unwrap(), Minutes::new(360), window).get(), 120);
/// ```
pub fn daily_night_minutes(start: ClockTime, span: Minutes, window: NightWindow) -> Minutes {
    if span <= Minutes::ZERO {
        return Minutes::ZERO;
    }

    let shift_start = start.minutes_since_midnight();
    let shift_end = shift_start + span.get();
    let window_start = window.start.minutes_since_midnight();
    let window_len = window.length().get();

    let last_day = shift_end / MINUTES_PER_DAY;
    let overlap: i64 = (-1..=last_day)
        .map(|day| {
            let from = day * MINUTES_PER_DAY + window_start;
            let to = from + window_len;
            (shift_end.min(to) - shift_start.max(from)).max(0)
        })
        .sum();

    Minutes::new(overlap)
}

/// Rounds a monetary amount to cents, halves away from zero.
///
/// ```
/// use timesheet_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(13714, 3)), Decimal::new(1371, 2));
/// assert_eq!(round_currency(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Pay for `minutes` at `hourly_rate × multiplier`, rounded to cents.
///
/// Multiplies before dividing by 60 so exact amounts stay exact.
pub fn pay_for(minutes: Minutes, hourly_rate: Decimal, multiplier: Decimal) -> Decimal {
    round_currency(Decimal::from(minutes.get()) * hourly_rate * multiplier / Decimal::from(60))
}

/// Rounds a non-negative quotient of minutes to the nearest whole minute.
pub fn average_minutes(total: Minutes, count: usize) -> Minutes {
    if count == 0 {
        return Minutes::ZERO;
    }
    let count = count as i64;
    let total = total.get().max(0);
    Minutes::new((2 * total + count) / (2 * count))
}
