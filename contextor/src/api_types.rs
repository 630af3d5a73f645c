//! Public API types re-used by external crates (e.g., the HTTP API layer).

/// Session used when the caller does not name one.
pub const DEFAULT_SESSION_ID: &str = "default_session";

/// One inbound question.
///
/// # Example
/// ```
/// use contextor::Query;
/// let q = Query::new("What is the processing fee?", None);
/// assert_eq!(q.session_id, "default_session");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub session_id: String,
}

impl Query {
    /// A missing or blank session id maps to [`DEFAULT_SESSION_ID`].
    pub fn new(text: impl Into<String>, session_id: Option<String>) -> Self {
        let session_id = session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());
        Self {
            text: text.into(),
            session_id,
        }
    }
}

/// Reply to one [`Query`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotReply {
    pub answer: String,
    pub sources: Vec<String>,
    /// `true` when answered from the FAQ table without retrieval.
    pub is_instant_faq: bool,
    pub nudge: Option<String>,
}
