pub mod calculator;
pub mod date_time;
pub mod news;
pub mod random;
pub mod registry;
pub mod tool;
pub mod weather;

pub use calculator::{CalculationError, CalculatorTool, Number};
pub use date_time::DateTimeTool;
pub use news::NewsTool;
pub use random::RandomSource;
pub use registry::{BoxedTool, ToolRegistry};
pub use tool::{Tool, ToolError, ToolKind, ToolName, ToolNameError, GENERAL_CHAT};
pub use weather::WeatherTool;

/// Builds one instance of the given built-in tool.
pub fn builtin_tool(kind: ToolKind, random: &RandomSource) -> BoxedTool {
    match kind {
        ToolKind::Weather => Box::new(WeatherTool::new(random.clone())),
        ToolKind::Calculator => Box::new(CalculatorTool::new()),
        ToolKind::News => Box::new(NewsTool::new(random.clone())),
        ToolKind::DateTime => Box::new(DateTimeTool::new()),
    }
}

/// Registry holding every built-in tool, sharing one random source.
pub fn builtin_registry(random: RandomSource) -> ToolRegistry {
    ToolRegistry::new(
        ToolKind::ALL
            .into_iter()
            .map(|kind| builtin_tool(kind, &random))
            .collect(),
    )
}
