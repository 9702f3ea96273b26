//! Lookup tables turning raw readings into presentation attributes.
//!
//! Every function here is total: unmapped weather codes fall into a default
//! bucket, and the temperature/AQI bands cover the whole input range. Bands are
//! checked in the listed order and the first match wins.

use serde::Serialize;

/// Coarse weather categories keyed by the provider's WMO weather code.
///
/// Codes 2 and 3 deliberately read as "Overcast" and "Rainy": the dashboard has
/// always labelled them that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    ClearSky,
    PartlyCloudy,
    Overcast,
    Rainy,
    Foggy,
    Drizzle,
    Rain,
    Snow,
    SnowGrains,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    ThunderstormWithHail,
    Unknown,
}

impl WeatherKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::PartlyCloudy,
            2 => Self::Overcast,
            3 => Self::Rainy,
            45 | 48 => Self::Foggy,
            51 | 53 | 55 => Self::Drizzle,
            61 | 63 | 65 => Self::Rain,
            71 | 73 | 75 => Self::Snow,
            77 => Self::SnowGrains,
            80 | 81 | 82 => Self::RainShowers,
            85 | 86 => Self::SnowShowers,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormWithHail,
            _ => Self::Unknown,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::ClearSky => "\u{2600}\u{fe0f}",
            Self::PartlyCloudy => "\u{1f324}\u{fe0f}",
            Self::Overcast => "\u{2601}\u{fe0f}",
            Self::Rainy | Self::Rain | Self::RainShowers => "\u{1f327}\u{fe0f}",
            Self::Foggy => "\u{1f32b}\u{fe0f}",
            Self::Drizzle => "\u{1f326}\u{fe0f}",
            Self::Snow | Self::SnowShowers => "\u{1f328}\u{fe0f}",
            Self::SnowGrains => "\u{2744}\u{fe0f}",
            Self::Thunderstorm | Self::ThunderstormWithHail => "\u{26c8}\u{fe0f}",
            Self::Unknown => "\u{1f321}\u{fe0f}",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Rainy => "Rainy",
            Self::Foggy => "Foggy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::SnowGrains => "Snow grains",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormWithHail => "Thunderstorm with hail",
            Self::Unknown => "Unknown weather condition",
        }
    }
}

pub fn weather_emoji(code: i32) -> &'static str {
    WeatherKind::from_code(code).emoji()
}

pub fn weather_description(code: i32) -> &'static str {
    WeatherKind::from_code(code).description()
}

/// Page background. Only the four lowest codes get a dedicated look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundTheme {
    Sunny,
    PartlyCloudy,
    Overcast,
    Rainy,
    Default,
}

impl BackgroundTheme {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Sunny,
            1 => Self::PartlyCloudy,
            2 => Self::Overcast,
            3 => Self::Rainy,
            _ => Self::Default,
        }
    }

    /// Tailwind classes used by the web renderer.
    pub fn css_classes(&self) -> &'static str {
        match self {
            Self::Sunny => "bg-gradient-to-br from-yellow-400 to-orange-600",
            Self::PartlyCloudy => "bg-gradient-to-br from-blue-300 to-gray-500",
            Self::Overcast => "bg-gray-500",
            Self::Rainy => "bg-blue-900 animate-raindrops",
            Self::Default => "bg-gradient-to-br from-blue-300 via-indigo-300 to-purple-400",
        }
    }
}

/// Theme of the weather-tip card. This grouping is independent of
/// [`BackgroundTheme`] and must not be derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTheme {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Neutral,
}

impl AdvisoryTheme {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 | 1 => Self::Sunny,
            2 | 3 | 45 | 48 => Self::Cloudy,
            51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => Self::Rainy,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snowy,
            95 | 96 | 99 => Self::Stormy,
            _ => Self::Neutral,
        }
    }
}

/// Clothing/comfort tip for a temperature in degrees Celsius.
///
/// NaN fails every comparison and lands in the coldest band.
pub fn temperature_advice(temperature_c: f64) -> &'static str {
    if temperature_c >= 30.0 {
        "It's hot outside! Stay hydrated and avoid the midday sun."
    } else if temperature_c >= 20.0 {
        "Warm and pleasant. Light clothing is enough."
    } else if temperature_c >= 10.0 {
        "Mild weather. A light jacket should do."
    } else if temperature_c >= 0.0 {
        "Chilly out there. Wear a warm coat."
    } else {
        "Freezing temperatures! Bundle up and watch for ice."
    }
}

pub const NEUTRAL_PARTICLE_COLOR: &str = "#ffffff";

/// Hex colour of the background particle effect.
pub fn particle_color(temperature_c: Option<f64>) -> &'static str {
    let Some(t) = temperature_c else {
        return NEUTRAL_PARTICLE_COLOR;
    };

    if t <= 0.0 {
        "#a5f3fc"
    } else if t <= 10.0 {
        "#60a5fa"
    } else if t <= 20.0 {
        "#22c55e"
    } else if t <= 30.0 {
        "#f59e0b"
    } else {
        "#ef4444"
    }
}

/// US EPA air-quality bands. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_index(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is good. Enjoy your outdoor activities!",
            Self::Moderate => {
                "Air quality is acceptable. Unusually sensitive people should limit prolonged outdoor exertion."
            }
            Self::UnhealthyForSensitiveGroups => {
                "Sensitive groups should reduce prolonged or heavy outdoor exertion."
            }
            Self::Unhealthy => "Everyone should limit prolonged outdoor exertion.",
            Self::VeryUnhealthy => "Avoid outdoor activities. Keep windows closed.",
            Self::Hazardous => "Health alert: stay indoors and use an air purifier if available.",
        }
    }

    /// Card theme identifier, named after the EPA colour for the band.
    pub fn theme(&self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Moderate => "yellow",
            Self::UnhealthyForSensitiveGroups => "orange",
            Self::Unhealthy => "red",
            Self::VeryUnhealthy => "purple",
            Self::Hazardous => "maroon",
        }
    }
}

pub fn aqi_advice(aqi: i32) -> &'static str {
    AqiCategory::from_index(aqi).advice()
}

pub fn aqi_theme(aqi: i32) -> &'static str {
    AqiCategory::from_index(aqi).theme()
}
