use crate::random::RandomSource;
use crate::tool::{Tool, ToolError, ToolKind, ToolName};

const CONDITIONS: [&str; 6] = [
    "sunny",
    "cloudy",
    "rainy",
    "snowy",
    "partly cloudy",
    "stormy",
];

/// Returns fabricated weather for any location. Nothing is cached.
pub struct WeatherTool {
    name: ToolName,
    random: RandomSource,
}

impl WeatherTool {
    pub fn new(random: RandomSource) -> Self {
        Self {
            name: ToolKind::Weather.name(),
            random,
        }
    }
}

impl Tool for WeatherTool {
    fn name(&self) -> &ToolName {
        &self.name
    }

    fn description(&self) -> &str {
        ToolKind::Weather.description()
    }

    fn run(&self, parameter: &str) -> Result<String, ToolError> {
        let location = self.require_parameter(parameter)?;

        let condition = self.random.choose(&CONDITIONS).copied().unwrap_or("sunny");
        let temperature = self.random.range_inclusive(-10..=39);
        let humidity = self.random.range_inclusive(30..=90);
        let wind_speed = self.random.range_inclusive(0..=25);

        Ok(format!(
            "Weather in {}:\n- Condition: {}\n- Temperature: {}°C\n- Humidity: {}%\n- Wind Speed: {} km/h",
            location, condition, temperature, humidity, wind_speed
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(report: &'a str, label: &str) -> &'a str {
        report
            .lines()
            .find_map(|line| line.strip_prefix(label))
            .unwrap()
    }

    #[test]
    fn should_report_weather_for_location() {
        let tool = WeatherTool::new(RandomSource::seeded(1));

        let report = tool.run("Tokyo").unwrap();

        assert!(report.starts_with("Weather in Tokyo:\n"));
        assert_eq!(report.lines().count(), 5);
        assert!(CONDITIONS.contains(&field(&report, "- Condition: ")));
    }

    #[test]
    fn should_keep_readings_in_bounds() {
        let tool = WeatherTool::new(RandomSource::seeded(99));

        for _ in 0..200 {
            let report = tool.run("Oslo").unwrap();

            let temperature: i32 = field(&report, "- Temperature: ")
                .trim_end_matches("°C")
                .parse()
                .unwrap();
            let humidity: i32 = field(&report, "- Humidity: ")
                .trim_end_matches('%')
                .parse()
                .unwrap();
            let wind: i32 = field(&report, "- Wind Speed: ")
                .trim_end_matches(" km/h")
                .parse()
                .unwrap();

            assert!((-10..=39).contains(&temperature));
            assert!((30..=90).contains(&humidity));
            assert!((0..=25).contains(&wind));
        }
    }

    #[test]
    fn should_be_deterministic_with_seeded_source() {
        let first = WeatherTool::new(RandomSource::seeded(123));
        let second = WeatherTool::new(RandomSource::seeded(123));

        assert_eq!(first.run("Paris").unwrap(), second.run("Paris").unwrap());
    }

    #[test]
    fn should_reject_empty_location() {
        let tool = WeatherTool::new(RandomSource::seeded(1));

        let error = tool.run("").unwrap_err();
        assert_eq!(error.tool_name, "weather_search");
    }
}
