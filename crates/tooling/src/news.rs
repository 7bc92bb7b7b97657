use crate::random::RandomSource;
use crate::tool::{Tool, ToolError, ToolKind, ToolName};

const HEADLINE_TEMPLATES: [&str; 5] = [
    "Breaking: Major developments in {topic} industry",
    "Experts discuss the future of {topic}",
    "New research reveals insights about {topic}",
    "Local community responds to {topic} changes",
    "Global impact of {topic} continues to grow",
];

pub const DEFAULT_HEADLINE_COUNT: usize = 5;

pub struct NewsTool {
    name: ToolName,
    random: RandomSource,
    headline_count: usize,
}

impl NewsTool {
    pub fn new(random: RandomSource) -> Self {
        Self {
            name: ToolKind::News.name(),
            random,
            headline_count: DEFAULT_HEADLINE_COUNT,
        }
    }

    /// Number of headlines per search, capped at the template pool size.
    pub fn with_headline_count(mut self, count: usize) -> Self {
        self.headline_count = count.min(HEADLINE_TEMPLATES.len());
        self
    }

    pub fn headline_count(&self) -> usize {
        self.headline_count
    }

    pub fn search(&self, topic: &str) -> String {
        let headlines: Vec<String> = self
            .random
            .sample(&HEADLINE_TEMPLATES, self.headline_count)
            .into_iter()
            .map(|template| format!("• {}", template.replace("{topic}", topic)))
            .collect();

        format!("Recent news about {}:\n{}", topic, headlines.join("\n"))
    }
}

impl Tool for NewsTool {
    fn name(&self) -> &ToolName {
        &self.name
    }

    fn description(&self) -> &str {
        ToolKind::News.description()
    }

    fn run(&self, parameter: &str) -> Result<String, ToolError> {
        let topic = self.require_parameter(parameter)?;
        Ok(self.search(topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn headlines(report: &str) -> Vec<&str> {
        report
            .lines()
            .skip(1)
            .map(|line| line.strip_prefix("• ").unwrap())
            .collect()
    }

    #[test]
    fn should_return_five_distinct_headlines_about_topic() {
        let tool = NewsTool::new(RandomSource::seeded(11));

        let report = tool.search("machine learning");

        assert!(report.starts_with("Recent news about machine learning:\n"));
        let lines = headlines(&report);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines.iter().collect::<HashSet<_>>().len(), 5);

        let pool: HashSet<String> = HEADLINE_TEMPLATES
            .iter()
            .map(|t| t.replace("{topic}", "machine learning"))
            .collect();
        for line in lines {
            assert!(line.contains("machine learning"));
            assert!(pool.contains(line));
        }
    }

    #[test]
    fn should_cap_headline_count_at_pool_size() {
        let tool = NewsTool::new(RandomSource::seeded(1)).with_headline_count(12);
        assert_eq!(tool.headline_count(), HEADLINE_TEMPLATES.len());

        let tool = NewsTool::new(RandomSource::seeded(1)).with_headline_count(2);
        assert_eq!(headlines(&tool.search("rust")).len(), 2);
    }

    #[test]
    fn should_be_deterministic_with_seeded_source() {
        let first = NewsTool::new(RandomSource::seeded(8));
        let second = NewsTool::new(RandomSource::seeded(8));

        assert_eq!(first.search("space"), second.search("space"));
    }

    #[test]
    fn should_trim_topic_when_run() {
        let tool = NewsTool::new(RandomSource::seeded(2));

        let report = tool.run("  climate ").unwrap();
        assert!(report.starts_with("Recent news about climate:"));
    }

    #[test]
    fn should_reject_empty_topic() {
        let tool = NewsTool::new(RandomSource::seeded(2));
        assert!(tool.run("").is_err());
    }
}
