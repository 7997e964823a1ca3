//! Monthly salary calculation.
//!
//! A month's salary is a daily rate, derived from the annual package, paid
//! for each working day the employee was not absent.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of paid days the annual package is spread over.
pub const ANNUAL_PAY_DIVISOR: u32 = 271;

/// Decimal places kept in every salary figure.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to two decimal places, halves to even.
///
/// The result always carries exactly two decimal places, so `20000`
/// comes back as `20000.00`.
///
/// # Example
///
/// ```
/// use attendance_payroll::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.125").unwrap()).to_string(), "10.12");
/// assert_eq!(round_currency(Decimal::from_str("10.135").unwrap()).to_string(), "10.14");
/// assert_eq!(round_currency(Decimal::from(20000)).to_string(), "20000.00");
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount
        .round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(CURRENCY_DECIMAL_PLACES);
    rounded
}

/// Returns the pay for one working day.
pub fn daily_rate(annual_package: Decimal) -> Decimal {
    annual_package / Decimal::from(ANNUAL_PAY_DIVISOR)
}

/// Returns the working days left after absences, never below zero.
pub fn effective_days(working_days: u32, absent_days: u32) -> u32 {
    working_days.saturating_sub(absent_days)
}

/// Calculates one month's salary.
///
/// `daily_rate = annual_package / 271`, paid for
/// `max(0, working_days - absent_days)` days, rounded to two decimal places.
/// Returns `None` if the product does not fit in a `Decimal`.
///
/// # Arguments
///
/// * `annual_package` - Annual gross compensation
/// * `absent_days` - Days absent in the month
/// * `working_days` - Working days in the month
///
/// # Example
///
/// ```
/// use attendance_payroll::calculation::calculate_salary;
/// use rust_decimal::Decimal;
///
/// let salary = calculate_salary(Decimal::from(271000), 3, 23);
/// assert_eq!(salary, Some(Decimal::from(20000)));
/// ```
pub fn calculate_salary(
    annual_package: Decimal,
    absent_days: u32,
    working_days: u32,
) -> Option<Decimal> {
    let days = Decimal::from(effective_days(working_days, absent_days));
    daily_rate(annual_package)
        .checked_mul(days)
        .map(round_currency)
}
