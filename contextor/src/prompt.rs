//! Prompt builder: system instructions + history, document context and question.

use rag_store::RagHit;

/// System instructions for the pricing assistant.
pub const DEFAULT_SYSTEM: &str = r#"
You are a friendly, knowledgeable assistant for a finance company.
Use the chat history to remember details the user has shared, such as their name.
Use the document context to answer questions about pricing, fees, rates and loan products.
If the context does not contain the answer, say so and suggest contacting the office.
If asked about previous questions or earlier parts of the conversation, refer to the chat history.
If the user has asked more than 2 questions and has not shared contact details yet, politely suggest they share their email for personalized assistance.
Be conversational and concise.
"#;

/// Builds the user prompt for one turn.
///
/// Sections appear in a fixed order: chat history (verbatim), the retrieved
/// chunk texts in rank order, then the current question.
///
/// # Example
/// ```
/// # use contextor::prompt::build_user_prompt;
/// let prompt = build_user_prompt("Human: hi\nAssistant: hello\n", &[], "What is the fee?");
/// assert!(prompt.contains("Current Question:\nWhat is the fee?"));
/// ```
pub fn build_user_prompt(history: &str, hits: &[RagHit], question: &str) -> String {
    let mut out = String::new();

    out.push_str("Chat History:\n");
    if history.trim().is_empty() {
        out.push_str("(none)\n");
    } else {
        out.push_str(history.trim_end());
        out.push('\n');
    }
    out.push('\n');

    out.push_str("Context from documents:\n");
    for (i, h) in hits.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        out.push_str(h.chunk.text.trim());
    }
    out.push_str("\n\n");

    out.push_str("Current Question:\n");
    out.push_str(question.trim());
    out.push('\n');
    out
}
