use std::fmt;

use weathernow_core::ViewModel;

/// Temperature rounded to whole degrees, or a dash when the provider sent none.
fn degrees(t: Option<f64>) -> String {
    match t {
        // as i64 so -0.4 doesn't show up as -0
        Some(t) => (t.round() as i64).to_string(),
        None => "--".to_string(),
    }
}

pub fn render_view(view: &ViewModel) -> String {
    Report(view).to_string()
}

struct Report<'a>(&'a ViewModel);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        if let Some(error) = &view.error {
            return writeln!(f, "{error}");
        }

        if let Some(location) = &view.location {
            writeln!(f, "{}", location.display_name)?;
        }
        if let Some(local_time) = &view.auxiliary.local_time {
            writeln!(f, "Local time: {local_time}")?;
        }

        if let Some(current) = &view.current {
            let c = &current.conditions;
            writeln!(f)?;
            writeln!(
                f,
                "{}°C {} {}",
                degrees(Some(c.temperature_c)),
                current.emoji,
                current.description
            )?;
            writeln!(f, "Wind speed: {} km/h", c.wind_speed_kmh)?;
            writeln!(f, "Tip: {}", current.advice)?;
        }

        if let Some(aq) = &view.air_quality {
            writeln!(f, "Air quality: {} ({}). {}", aq.index, aq.label, aq.advice)?;
        }

        if !view.hourly.is_empty() {
            writeln!(f, "\nHourly forecast")?;
            for hour in &view.hourly {
                writeln!(
                    f,
                    "  {:>5}  {}  {}°C",
                    hour.timestamp.format("%-I %p").to_string(),
                    hour.emoji,
                    degrees(hour.temperature_c)
                )?;
            }
        }

        if !view.daily.is_empty() {
            writeln!(f, "\n{}-day forecast", view.daily.len())?;
            for day in &view.daily {
                writeln!(
                    f,
                    "  {}  {}  {}° / {}°",
                    day.date.format("%a %b %-d"),
                    day.emoji,
                    degrees(day.temperature_max_c),
                    degrees(day.temperature_min_c)
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use weathernow_core::{
        AuxiliaryData, Coordinate, CurrentConditions, CurrentView, DailyForecastEntry,
        HourlyForecastEntry, LocationResult,
    };

    fn view() -> ViewModel {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        ViewModel {
            location: Some(LocationResult {
                coordinate: Coordinate::new(48.8566, 2.3522),
                display_name: "Paris, France".into(),
            }),
            current: Some(CurrentView::classify(CurrentConditions {
                temperature_c: 18.4,
                wind_speed_kmh: 11.2,
                weather_code: 0,
            })),
            hourly: vec![HourlyForecastEntry {
                timestamp: date.and_hms_opt(15, 0, 0).unwrap(),
                temperature_c: Some(-0.4),
                weather_code: Some(0),
                emoji: "*",
                description: "Clear sky",
            }],
            daily: vec![DailyForecastEntry {
                date,
                temperature_max_c: Some(24.6),
                temperature_min_c: Some(13.2),
                weather_code: Some(0),
                emoji: "*",
                description: "Clear sky",
            }],
            auxiliary: AuxiliaryData {
                local_time: Some("Saturday 14:05".into()),
                air_quality_index: None,
            },
            air_quality: None,
            error: None,
        }
    }

    #[test]
    fn renders_sections() {
        let text = render_view(&view());

        assert!(text.starts_with("Paris, France\nLocal time: Saturday 14:05\n"));
        assert!(text.contains("18°C"));
        assert!(text.contains("Clear sky"));
        assert!(text.contains("Wind speed: 11.2 km/h"));
        assert!(text.contains(" 3 PM  *  0°C"));
        assert!(text.contains("1-day forecast"));
        assert!(text.contains("Sat Jun 1  *  25° / 13°"));
        assert!(!text.contains("Air quality"));
    }

    #[test]
    fn renders_dash_for_missing_temperature() {
        let mut view = view();
        view.hourly[0].temperature_c = None;
        view.daily[0].temperature_min_c = None;

        let text = render_view(&view);

        assert!(text.contains(" 3 PM  *  --°C"));
        assert!(text.contains("Sat Jun 1  *  25° / --°"));
    }

    #[test]
    fn renders_only_error() {
        let text = render_view(&ViewModel::errored("Please enter a city"));
        assert_eq!(text, "Please enter a city\n");
    }
}
