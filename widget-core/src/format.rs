//! Turns a [`WeatherResult`] into the three lines the widget displays.
//!
//! Everything here is pure. The time of day is passed in by the caller so
//! only the presentation layer ever touches the wall clock.

use chrono::Timelike;

use crate::model::{TemperatureUnit, WeatherResult};

/// Hour (inclusive) at which evening starts counting as night.
const NIGHT_STARTS: u32 = 18;
/// Hour (exclusive) until which early morning still counts as night.
const NIGHT_ENDS: u32 = 6;

/// Banded message for a temperature.
///
/// Bands are half-open, so 0, 10, 20 and 30 belong to the warmer band.
pub fn temperature_message(temperature: f64, unit: TemperatureUnit) -> String {
    // -0.0 would otherwise print as "-0".
    let temperature = if temperature == 0.0 { 0.0 } else { temperature };

    if unit != TemperatureUnit::Celsius {
        return format!("{temperature}°{unit}");
    }

    if temperature < 0.0 {
        format!("It's freezing at {temperature}°C! Bundle up!")
    } else if temperature < 10.0 {
        format!("It's quite cold at {temperature}°C. Wear warm clothes.")
    } else if temperature < 20.0 {
        format!("The temperature is {temperature}°C. Comfortable for a light jacket.")
    } else if temperature < 30.0 {
        format!("It's a pleasant {temperature}°C. Enjoy the nice weather!")
    } else {
        format!("It's hot at {temperature}°C. Stay hydrated!")
    }
}

/// Canned sentence for a known condition label, or the label itself.
pub fn condition_message(condition_label: &str) -> String {
    let sentence = match condition_label.to_lowercase().as_str() {
        "sunny" => "It's a beautiful sunny day!",
        "partly cloudy" => "Expect some clouds and sunshine.",
        "cloudy" => "It's cloudy today.",
        "rain" => "Don't forget your umbrella! It's raining.",
        "thunderstorm" => "Thunderstorms are expected.",
        "snow" => "Bundle up! It's snowing.",
        "mist" => "It's misty outside.",
        "fog" => "Be careful, there's fog outside.",
        _ => return condition_label.to_string(),
    };

    sentence.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        if hour >= NIGHT_STARTS || hour < NIGHT_ENDS { DayPeriod::Night } else { DayPeriod::Day }
    }

    pub fn qualifier(&self) -> &'static str {
        match self {
            DayPeriod::Day => "during the day",
            DayPeriod::Night => "at night",
        }
    }
}

/// Location name qualified by whether `now` falls in the day or the night.
pub fn location_message<T: Timelike>(location_name: &str, now: &T) -> String {
    let period = DayPeriod::from_hour(now.hour());
    format!("{location_name} {}", period.qualifier())
}

/// The rendered lines for one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub temperature: String,
    pub condition: String,
    pub location: String,
}

impl WeatherView {
    pub fn render<T: Timelike>(result: &WeatherResult, now: &T) -> Self {
        Self {
            temperature: temperature_message(result.temperature, result.unit),
            condition: condition_message(&result.condition_label),
            location: location_message(&result.location_name, now),
        }
    }

    pub fn lines(&self) -> [&str; 3] {
        [self.temperature.as_str(), self.condition.as_str(), self.location.as_str()]
    }
}
