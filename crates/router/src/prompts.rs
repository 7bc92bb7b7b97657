//! Prompt templates sent to the language model.

pub fn routing_prompt(query: &str, available_tools: &str) -> String {
    format!(
        "You are a smart assistant. Choose the best tool for this query from the list below:\n\
         {available_tools}\n\
         Query: {query}\n\
         Answer only with the tool name or 'general_chat'."
    )
}

pub fn extraction_prompt(query: &str, tool_description: &str) -> String {
    format!(
        "You are a helpful assistant. Extract the main input from the query to use with this tool:\n\
         {tool_description}\n\
         Query: {query}\n\
         Return only the input needed by the tool."
    )
}

pub fn general_chat_prompt(context: &str, message: &str) -> String {
    format!(
        "You are a friendly assistant. Use the conversation context to reply naturally.\n\
         Context: {context}\n\
         Message: {message}"
    )
}
