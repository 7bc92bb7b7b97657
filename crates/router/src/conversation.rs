use crate::error::RouterError;
use crate::query::{QueryRouter, Route};
use crate::strategy::{ChatResponder, PromptedModel};
use llm::LanguageModel;
use log::{error, info};
use router_core::{ConversationHistory, ConversationTurn, RouterConfig};
use std::sync::Arc;
use tooling::ToolRegistry;

pub const DEFAULT_CONTEXT_WINDOW: usize = 4;

/// Smallest non-zero history cap; one exchange must always fit.
const MIN_HISTORY_LIMIT: usize = 2;

/// Routes messages while keeping a running conversation history.
///
/// `process_message` takes `&mut self`: one message is handled at a time per
/// conversation.
pub struct ConversationRouter {
    query_router: QueryRouter,
    responder: Arc<dyn ChatResponder>,
    history: ConversationHistory,
    context_window: usize,
}

impl std::fmt::Debug for ConversationRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationRouter")
            .field("query_router", &self.query_router)
            .field("responder", &"ChatResponder<...>")
            .field("history", &self.history)
            .field("context_window", &self.context_window)
            .finish()
    }
}

impl ConversationRouter {
    pub fn new(query_router: QueryRouter, responder: Arc<dyn ChatResponder>) -> Self {
        Self {
            query_router,
            responder,
            history: ConversationHistory::new(),
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// One language model drives routing, extraction and general chat.
    pub fn with_model<M>(registry: Arc<ToolRegistry>, model: M) -> Self
    where
        M: LanguageModel + 'static,
    {
        let prompted = Arc::new(PromptedModel::new(model));
        let query_router = QueryRouter::new(registry, prompted.clone(), prompted.clone());
        Self::new(query_router, prompted)
    }

    pub fn with_config(self, config: &RouterConfig) -> Self {
        self.with_context_window(config.context_window)
            .with_history_limit(config.history_limit)
    }

    pub fn with_context_window(mut self, turns: usize) -> Self {
        self.context_window = turns;
        self
    }

    /// Caps retained turns; zero keeps everything. Existing turns are kept.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        let mut history = if limit == 0 {
            ConversationHistory::unbounded()
        } else {
            ConversationHistory::with_max_turns(limit.max(MIN_HISTORY_LIMIT))
        };
        for turn in self.history.iter() {
            history.append(turn.clone());
        }
        self.history = history;
        self
    }

    pub fn query_router(&self) -> &QueryRouter {
        &self.query_router
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn context_window(&self) -> usize {
        self.context_window
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub async fn process_message(&mut self, message: &str) -> String {
        self.history.append(ConversationTurn::user(message));

        let route = self.query_router.route_query(message).await;
        info!("Message routed to {}", route);

        let response = match &route {
            Route::GeneralChat => self.general_chat(message).await,
            Route::Tool(tool) => self.query_router.execute_tool(tool, message).await,
        };

        self.history
            .append(ConversationTurn::assistant(response.clone()));
        response
    }

    async fn general_chat(&self, message: &str) -> String {
        let context = self.history.render_recent(self.context_window);

        match self.responder.respond(&context, message).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("General chat model call failed: {:#}", e);
                RouterError::ModelUnavailable(format!("{:#}", e)).to_string()
            }
        }
    }
}
