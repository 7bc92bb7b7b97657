use crate::tool::{Tool, ToolName};
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

pub type BoxedTool = Box<dyn Tool>;

/// Immutable, ordered set of tools keyed by name.
///
/// Iteration follows construction order. On duplicate names the last tool
/// wins but keeps the slot of the first occurrence.
pub struct ToolRegistry {
    tools: Vec<Arc<BoxedTool>>,
    index: HashMap<ToolName, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<BoxedTool>) -> Self {
        let mut ordered: Vec<Arc<BoxedTool>> = Vec::with_capacity(tools.len());
        let mut index = HashMap::new();

        for tool in tools {
            let name = tool.name().clone();
            match index.get(&name) {
                Some(&slot) => {
                    warn!("Tool '{}' registered twice, keeping the later one", name);
                    ordered[slot] = Arc::new(tool);
                }
                None => {
                    index.insert(name, ordered.len());
                    ordered.push(Arc::new(tool));
                }
            }
        }

        Self {
            tools: ordered,
            index,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Looks up a tool by its raw name, as returned by a model.
    pub fn get(&self, name: &str) -> Option<Arc<BoxedTool>> {
        let name = ToolName::new(name).ok()?;
        self.get_tool(&name)
    }

    pub fn get_tool(&self, name: &ToolName) -> Option<Arc<BoxedTool>> {
        self.index.get(name).map(|&slot| Arc::clone(&self.tools[slot]))
    }

    pub fn is_registered(&self, name: &ToolName) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<ToolName> {
        self.tools.iter().map(|tool| tool.name().clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxedTool> {
        self.tools.iter().map(|tool| tool.as_ref())
    }

    /// Renders `- name: description` lines in registration order.
    pub fn describe(&self) -> String {
        self.iter()
            .map(|tool| format!("- {}: {}", tool.name(), tool.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolError;

    struct TestTool {
        name: ToolName,
        description: String,
        should_fail: bool,
    }

    impl TestTool {
        fn new(name: &str, description: &str) -> BoxedTool {
            Box::new(Self {
                name: ToolName::new(name).unwrap(),
                description: description.to_string(),
                should_fail: false,
            })
        }

        fn new_failing(name: &str) -> BoxedTool {
            Box::new(Self {
                name: ToolName::new(name).unwrap(),
                description: "A failing tool".to_string(),
                should_fail: true,
            })
        }
    }

    impl Tool for TestTool {
        fn name(&self) -> &ToolName {
            &self.name
        }

        fn description(&self) -> &str {
            &self.description
        }

        fn run(&self, parameter: &str) -> Result<String, ToolError> {
            if self.should_fail {
                return Err(ToolError::new(
                    self.name.as_str(),
                    "Simulated failure",
                    true,
                ));
            }
            Ok(format!("Echo: {}", parameter))
        }
    }

    #[test]
    fn should_create_empty_registry() {
        let registry = ToolRegistry::empty();
        assert_eq!(registry.tool_count(), 0);
        assert!(registry.is_empty());
        assert_eq!(registry.describe(), "");
    }

    #[test]
    fn should_get_registered_tool() {
        let registry = ToolRegistry::new(vec![TestTool::new("test_tool", "A test tool")]);

        let retrieved = registry.get("test_tool");
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().name().as_str(), "test_tool");
        assert!(registry.is_registered(&ToolName::new("test_tool").unwrap()));
    }

    #[test]
    fn should_return_none_for_unregistered_tool() {
        let registry = ToolRegistry::new(vec![TestTool::new("test_tool", "A test tool")]);

        assert!(registry.get("nonexistent_tool").is_none());
        assert!(registry.get("Not A Name").is_none());
        assert!(registry.get("general_chat").is_none());
    }

    #[test]
    fn should_preserve_registration_order() {
        let registry = ToolRegistry::new(vec![
            TestTool::new("zeta", "last letter"),
            TestTool::new("alpha", "first letter"),
            TestTool::new("mid", "middle"),
        ]);

        let names: Vec<String> = registry.names().into_iter().map(String::from).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            registry.describe(),
            "- zeta: last letter\n- alpha: first letter\n- mid: middle"
        );
    }

    #[test]
    fn should_let_last_duplicate_win_in_first_slot() {
        let registry = ToolRegistry::new(vec![
            TestTool::new("echo", "first"),
            TestTool::new("other", "other"),
            TestTool::new("echo", "second"),
        ]);

        assert_eq!(registry.tool_count(), 2);
        assert_eq!(registry.get("echo").unwrap().description(), "second");
        assert_eq!(registry.describe(), "- echo: second\n- other: other");
    }

    #[test]
    fn should_run_registered_tool() {
        let registry = ToolRegistry::new(vec![TestTool::new("test_tool", "A test tool")]);

        let tool = registry.get("test_tool").unwrap();
        assert_eq!(tool.run("hello world").unwrap(), "Echo: hello world");
    }

    #[test]
    fn should_surface_tool_failure() {
        let registry = ToolRegistry::new(vec![TestTool::new_failing("failing_tool")]);

        let error = registry.get("failing_tool").unwrap().run("test").unwrap_err();
        assert_eq!(error.tool_name, "failing_tool");
        assert!(error.message.contains("Simulated failure"));
        assert!(error.recoverable);
    }
}
