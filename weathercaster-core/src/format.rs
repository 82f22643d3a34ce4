use crate::{model::Conditions, units::UnitSystem};

/// Render a one-line forecast such as
/// `clear sky, temp 82.7 ºF, feels like 80.6 ºF, humidity 38.0%, wind 9.2 MPH`.
///
/// Clauses whose value is absent from `conditions` are left out entirely.
pub fn format_forecast(conditions: &Conditions, units: UnitSystem) -> String {
    let temp_unit = units.temperature_label();
    let speed_unit = units.speed_label();

    let mut forecast = conditions.description.clone();

    if let Some(kelvin) = conditions.temperature {
        let temp = units.convert_temperature(kelvin);
        forecast.push_str(&format!(", temp {temp:.1} {temp_unit}"));
    }

    if let Some(kelvin) = conditions.feels_like {
        let feels_like = units.convert_temperature(kelvin);
        forecast.push_str(&format!(", feels like {feels_like:.1} {temp_unit}"));
    }

    if let Some(humidity) = conditions.humidity {
        forecast.push_str(&format!(", humidity {humidity:.1}%"));
    }

    if let Some(speed) = conditions.wind_speed {
        let speed = units.convert_speed(speed);
        forecast.push_str(&format!(", wind {speed:.1} {speed_unit}"));
    }

    forecast
}
