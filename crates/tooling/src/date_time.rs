use crate::tool::{Tool, ToolError, ToolKind, ToolName};
use chrono::{Local, NaiveDateTime};

pub type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Reports the local time. The location is echoed back as a label only.
pub struct DateTimeTool {
    name: ToolName,
    clock: Clock,
}

impl Default for DateTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTimeTool {
    pub fn new() -> Self {
        Self::with_clock(Box::new(|| Local::now().naive_local()))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            name: ToolKind::DateTime.name(),
            clock,
        }
    }
}

impl Tool for DateTimeTool {
    fn name(&self) -> &ToolName {
        &self.name
    }

    fn description(&self) -> &str {
        ToolKind::DateTime.description()
    }

    fn run(&self, parameter: &str) -> Result<String, ToolError> {
        let location = self.require_parameter(parameter)?;
        let now = (self.clock)();
        Ok(format!(
            "Current date and time in {}: {}",
            location,
            now.format("%Y-%m-%d %H:%M:%S")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_clock() -> Clock {
        Box::new(|| {
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(7, 5, 30)
                .unwrap()
        })
    }

    #[test]
    fn should_format_timestamp_with_fixed_clock() {
        let tool = DateTimeTool::with_clock(fixed_clock());

        let result = tool.run("London").unwrap();

        assert_eq!(result, "Current date and time in London: 2024-03-09 07:05:30");
    }

    #[test]
    fn should_not_shift_time_by_location() {
        let tool = DateTimeTool::with_clock(fixed_clock());

        let london = tool.run("London").unwrap();
        let tokyo = tool.run("Tokyo").unwrap();

        assert_eq!(
            london.rsplit_once(": ").unwrap().1,
            tokyo.rsplit_once(": ").unwrap().1
        );
    }

    #[test]
    fn should_use_local_clock_by_default() {
        let tool = DateTimeTool::new();

        let result = tool.run("Berlin").unwrap();
        let stamp = result.rsplit_once(": ").unwrap().1;

        assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn should_reject_empty_location() {
        let tool = DateTimeTool::with_clock(fixed_clock());
        assert!(tool.run(" ").is_err());
    }
}
