//! Unit conversions for weather-service fields.

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Convert a Kelvin temperature to (Celsius, Fahrenheit).
///
/// Both values are rounded to one decimal place, matching the precision the
/// station reports for remote temperatures.
///
/// # Example
///
/// ```
/// use skylark_types::convert_temp;
///
/// assert_eq!(convert_temp(273.15), (0.0, 32.0));
/// assert_eq!(convert_temp(300.0), (26.9, 80.3));
/// ```
#[must_use]
pub fn convert_temp(kelvin: f32) -> (f32, f32) {
    let celsius = kelvin - 273.15;
    let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
    (round1(celsius), round1(fahrenheit))
}
