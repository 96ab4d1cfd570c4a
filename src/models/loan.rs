//! Loan action models

use serde::{Deserialize, Serialize};
use std::fmt;

use super::submission::UserId;

/// Action accepted by the `/do/<action>` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanAction {
    Loan,
    Return,
}

impl LoanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanAction::Loan => "loan",
            LoanAction::Return => "return",
        }
    }
}

impl fmt::Display for LoanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loan or return to record for a user and a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRequest {
    pub action: LoanAction,
    pub user_id: String,
    pub isbn: String,
    /// `YYYY-MM-DDTHH:mm`; the server stamps the current time when absent
    pub logged_at: Option<String>,
}

/// JSON reply of the `/do/<action>` endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoanReply {
    pub ok: bool,
    #[serde(default)]
    pub action: Option<LoanAction>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoanReply {
    /// Human-readable reason, `message` first since `error` is a code here
    pub fn failure_reason(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|reason| !reason.is_empty())
    }
}
