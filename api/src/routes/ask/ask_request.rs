use contextor::{BotReply, Query};
use serde::{Deserialize, Serialize};

/// Request payload for POST /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub user_query: String,
    /// Conversation thread; `"default_session"` when omitted.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl From<AskRequest> for Query {
    fn from(r: AskRequest) -> Self {
        Query::new(r.user_query, r.session_id)
    }
}

/// Response payload for POST /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub bot_response: String,
    pub sources: Vec<String>,
    pub is_instant_faq: bool,
    /// Serialized as `null` when absent.
    pub nudge: Option<String>,
}

impl From<BotReply> for AskResponse {
    fn from(r: BotReply) -> Self {
        Self {
            bot_response: r.answer,
            sources: r.sources,
            is_instant_faq: r.is_instant_faq,
            nudge: r.nudge,
        }
    }
}
