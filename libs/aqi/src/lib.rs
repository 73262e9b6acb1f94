//! AQI library
//!
//! This library maps a particulate concentration onto an Air Quality Index
//! using a fixed piecewise-linear breakpoint table, and translates the
//! resulting index into the EPA color bands. It supports both std and
//! no_std environments and uses integer arithmetic only, so the result does
//! not depend on the target's floating point support.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Color enum provides colors corresponding to EPA AQI levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    DarkPurple,
}

/// How a fractional interpolation result becomes an integer AQI.
///
/// Every branch of the table interpolates from its lower edge upwards, so
/// the intermediate value is never negative and `Truncate` is also a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rounding {
    /// Drop the fractional part (51.25 -> 51).
    #[default]
    Truncate,
    /// Round to the closest integer, halves away from zero (51.5 -> 52).
    Nearest,
    /// Any fractional part rounds up (51.25 -> 52).
    Ceiling,
}

impl Rounding {
    /// Divides a non-negative `numerator` by a positive `denominator`.
    fn divide(self, numerator: i64, denominator: i64) -> i64 {
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        match self {
            Rounding::Truncate => quotient,
            Rounding::Nearest if remainder * 2 >= denominator => quotient + 1,
            Rounding::Nearest => quotient,
            Rounding::Ceiling if remainder != 0 => quotient + 1,
            Rounding::Ceiling => quotient,
        }
    }
}

/// One interval of the breakpoint table.
///
/// Inputs in `(low, high]` interpolate linearly onto `(aqi_low, aqi_high]`.
/// The first interval also accepts `low` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub low: i32,
    pub high: i32,
    pub aqi_low: i32,
    pub aqi_high: i32,
}

impl Breakpoint {
    const fn new(low: i32, high: i32, aqi_low: i32, aqi_high: i32) -> Self {
        Self {
            low,
            high,
            aqi_low,
            aqi_high,
        }
    }

    fn interpolate(&self, concentration: i32, rounding: Rounding) -> i32 {
        // AQI = AQIlow + (AQIhigh - AQIlow) * (C - Clow) / (Chigh - Clow)
        // kept as a single rational so the rounding policy sees the exact value
        let numerator = (self.aqi_high - self.aqi_low) as i64 * (concentration - self.low) as i64;
        let denominator = (self.high - self.low) as i64;
        let offset = rounding.divide(numerator, denominator);
        (self.aqi_low as i64 + offset).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

/// Breakpoints for the weighted particulate concentration.
///
/// The last interval is open ended: anything above 500 keeps climbing with
/// slope 1, its `high` edge only fixes that slope.
pub const BREAKPOINTS: [Breakpoint; 7] = [
    Breakpoint::new(0, 35, 0, 50),       // Good
    Breakpoint::new(35, 75, 50, 100),    // Moderate
    Breakpoint::new(75, 115, 100, 150),  // Unhealthy for Sensitive Groups
    Breakpoint::new(115, 150, 150, 200), // Unhealthy
    Breakpoint::new(150, 250, 200, 300), // Very Unhealthy
    Breakpoint::new(250, 500, 300, 500), // Hazardous
    Breakpoint::new(500, 1000, 500, 1000), // Beyond the index
];

/// Maps concentrations onto AQI values with a fixed rounding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AqiMapper {
    rounding: Rounding,
}

impl AqiMapper {
    pub const fn new(rounding: Rounding) -> Self {
        Self { rounding }
    }

    /// Calulate the AQI for the provided concentration.
    ///
    /// # Arguments
    ///
    /// * `concentration` - The weighted particulate concentration, possibly
    ///   negative.
    ///
    /// # Returns
    ///
    /// The interpolated AQI. Negative input always maps to 0 and input above
    /// 500 is extrapolated with slope 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use aqi::{AqiMapper, Rounding};
    ///
    /// let mapper = AqiMapper::new(Rounding::Truncate);
    /// assert_eq!(mapper.map(35), 50);
    /// assert_eq!(mapper.map(36), 51);
    /// assert_eq!(mapper.map(-5), 0);
    /// assert_eq!(mapper.map(600), 600);
    /// ```
    pub fn map(&self, concentration: i32) -> i32 {
        if concentration < 0 {
            return 0;
        }

        // Find the appropriate breakpoint range
        for (i, bp) in BREAKPOINTS.iter().enumerate() {
            let open_ended = i == BREAKPOINTS.len() - 1;
            if concentration <= bp.high || open_ended {
                return bp.interpolate(concentration, self.rounding);
            }
        }

        0
    }
}

/// Calculates the AQI with the default truncating policy.
pub fn calculate_aqi(concentration: i32) -> i32 {
    AqiMapper::default().map(concentration)
}

/// Provides a Color enum variant value based on the
/// specified AQI value. Uses the ranges provided by the
/// EPA for mapping AQI to color.
///
/// # Arguments
///
/// * `aqi` - The calculated AQI
///
/// # Returns
///
/// A Color enum variant.
///
/// # Examples
///
/// ```
/// use aqi::{calculate_aqi, get_aqi_color, Color};
///
/// let aqi = calculate_aqi(30);
/// assert_eq!(get_aqi_color(aqi), Color::Green);
/// ```
pub fn get_aqi_color(aqi: i32) -> Color {
    match aqi {
        i32::MIN..=50 => Color::Green,
        51..=100 => Color::Yellow,
        101..=150 => Color::Orange,
        151..=200 => Color::Red,
        201..=300 => Color::Purple,
        _ => Color::DarkPurple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::format;

    #[test]
    fn test_calculate_aqi_breakpoint_edges() {
        assert_eq!(calculate_aqi(0), 0);
        assert_eq!(calculate_aqi(35), 50);
        assert_eq!(calculate_aqi(75), 100);
        assert_eq!(calculate_aqi(115), 150);
        assert_eq!(calculate_aqi(150), 200);
        assert_eq!(calculate_aqi(250), 300);
        assert_eq!(calculate_aqi(500), 500);
    }

    #[test]
    fn test_calculate_aqi_interpolates() {
        // 50 + 50/40 * 1 = 51.25
        assert_eq!(calculate_aqi(36), 51);
        // 50/35 * 30 = 42.857
        assert_eq!(calculate_aqi(30), 42);
        // 300 + 0.8 * 50 = 340
        assert_eq!(calculate_aqi(300), 340);
        // 150 + 50/35 * 20 = 178.57
        assert_eq!(calculate_aqi(135), 178);
        assert_eq!(calculate_aqi(200), 250);
    }

    #[test]
    fn test_calculate_aqi_out_of_table() {
        assert_eq!(calculate_aqi(-5), 0);
        assert_eq!(calculate_aqi(-1), 0);
        assert_eq!(calculate_aqi(i32::MIN), 0);
        assert_eq!(calculate_aqi(501), 501);
        assert_eq!(calculate_aqi(600), 600);
        assert_eq!(calculate_aqi(i32::MAX), i32::MAX);
    }

    #[test]
    fn test_rounding_policies() {
        let nearest = AqiMapper::new(Rounding::Nearest);
        let ceiling = AqiMapper::new(Rounding::Ceiling);

        assert_eq!(nearest.map(36), 51);
        assert_eq!(ceiling.map(36), 52);
        assert_eq!(nearest.map(30), 43);
        assert_eq!(ceiling.map(30), 43);
        // 50 + 50/40 * 2 = 52.5
        assert_eq!(nearest.map(37), 53);
        // exact values are left alone by every policy
        assert_eq!(nearest.map(35), 50);
        assert_eq!(ceiling.map(35), 50);
        assert_eq!(ceiling.map(-5), 0);
    }

    #[test]
    fn test_get_aqi_color() {
        assert_eq!(get_aqi_color(0), Color::Green);
        assert_eq!(get_aqi_color(50), Color::Green);
        assert_eq!(get_aqi_color(51), Color::Yellow);
        assert_eq!(get_aqi_color(100), Color::Yellow);
        assert_eq!(get_aqi_color(101), Color::Orange);
        assert_eq!(get_aqi_color(150), Color::Orange);
        assert_eq!(get_aqi_color(151), Color::Red);
        assert_eq!(get_aqi_color(200), Color::Red);
        assert_eq!(get_aqi_color(201), Color::Purple);
        assert_eq!(get_aqi_color(300), Color::Purple);
        assert_eq!(get_aqi_color(301), Color::DarkPurple);
        assert_eq!(get_aqi_color(999), Color::DarkPurple);
    }

    proptest! {
        #[test]
        fn aqi_is_monotonic(c in -1000i32..100_000) {
            prop_assert!(calculate_aqi(c) <= calculate_aqi(c + 1));
        }

        #[test]
        fn policies_stay_within_one(c in 0i32..10_000) {
            let low = AqiMapper::new(Rounding::Truncate).map(c);
            let high = AqiMapper::new(Rounding::Ceiling).map(c);
            let mid = AqiMapper::new(Rounding::Nearest).map(c);
            prop_assert!(low <= mid && mid <= high && high - low <= 1);
        }
    }
}
