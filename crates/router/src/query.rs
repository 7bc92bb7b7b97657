use crate::error::RouterError;
use crate::keywords::keyword_matches;
use crate::strategy::{Classifier, Extractor, PromptedModel};
use llm::LanguageModel;
use log::{debug, error, info, warn};
use std::fmt;
use std::sync::Arc;
use tooling::{ToolName, ToolRegistry, GENERAL_CHAT};

/// Outcome of routing a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Tool(ToolName),
    GeneralChat,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Tool(name) => write!(f, "{}", name),
            Route::GeneralChat => f.write_str(GENERAL_CHAT),
        }
    }
}

/// Chooses a tool for a query and runs it.
///
/// Routing asks the classifier first and falls back to the keyword table when
/// the answer is not a registered tool. Neither routing nor execution ever
/// returns an error: failures become user-facing text.
pub struct QueryRouter {
    registry: Arc<ToolRegistry>,
    classifier: Arc<dyn Classifier>,
    extractor: Arc<dyn Extractor>,
}

impl fmt::Debug for QueryRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRouter")
            .field("registry", &self.registry)
            .field("classifier", &"Classifier<...>")
            .field("extractor", &"Extractor<...>")
            .finish()
    }
}

impl QueryRouter {
    pub fn new(
        registry: Arc<ToolRegistry>,
        classifier: Arc<dyn Classifier>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            registry,
            classifier,
            extractor,
        }
    }

    /// Uses one language model for both classification and extraction.
    pub fn with_model<M>(registry: Arc<ToolRegistry>, model: M) -> Self
    where
        M: LanguageModel + 'static,
    {
        let prompted = Arc::new(PromptedModel::new(model));
        Self::new(registry, prompted.clone(), prompted)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn route_query(&self, query: &str) -> Route {
        let listing = self.registry.describe();

        match self.classifier.classify(query, &listing).await {
            Ok(answer) => {
                let answer = answer.trim();
                if let Some(tool) = self.registry.get(answer) {
                    debug!("Model routed query to '{}'", answer);
                    return Route::Tool(tool.name().clone());
                }
                debug!(
                    "Model answer '{}' is not a registered tool, trying keywords",
                    answer
                );
            }
            Err(e) => {
                warn!("Routing model call failed, trying keywords: {:#}", e);
            }
        }

        self.keyword_route(query)
    }

    /// Routes by the static keyword table alone, skipping unregistered tools.
    pub fn keyword_route(&self, query: &str) -> Route {
        keyword_matches(query)
            .map(|kind| kind.name())
            .find(|name| self.registry.is_registered(name))
            .map(Route::Tool)
            .unwrap_or(Route::GeneralChat)
    }

    pub async fn execute_tool(&self, tool: &ToolName, query: &str) -> String {
        match self.try_execute_tool(tool, query).await {
            Ok(output) => output,
            Err(RouterError::ToolExecution(e)) if !e.recoverable => {
                error!("Tool '{}' failed permanently: {}", tool, e);
                RouterError::ToolExecution(e).to_string()
            }
            Err(e) => {
                warn!("Tool '{}' did not produce a result: {:?}", tool, e);
                e.to_string()
            }
        }
    }

    async fn try_execute_tool(&self, tool: &ToolName, query: &str) -> Result<String, RouterError> {
        let tool = self
            .registry
            .get_tool(tool)
            .ok_or_else(|| RouterError::UnknownTool(tool.to_string()))?;

        let parameter = self
            .extractor
            .extract(query, tool.description())
            .await
            .map_err(|e| RouterError::Extraction(format!("{:#}", e)))?;
        let parameter = parameter.trim();

        info!("Running tool '{}' with input '{}'", tool.name(), parameter);
        Ok(tool.run(parameter)?)
    }
}
