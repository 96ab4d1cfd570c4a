//! Loan and return actions through the `/do/<action>` endpoint

use std::sync::Arc;

use crate::{
    error::{ClientError, ClientResult},
    messages::Message,
    models::{LoanReply, LoanRequest},
    services::{http::HttpTransport, notifier::Announcer},
};

#[derive(Clone)]
pub struct LoansClient {
    transport: Arc<dyn HttpTransport>,
    announcer: Announcer,
}

impl LoansClient {
    pub fn new(transport: Arc<dyn HttpTransport>, announcer: Announcer) -> Self {
        Self {
            transport,
            announcer,
        }
    }

    /// Record a loan or a return.
    ///
    /// `Ok` carries the server reply whether it accepted the action or not;
    /// `Err` covers local validation, transport failures and non-JSON replies.
    /// The user is notified in every case.
    pub async fn perform(&self, request: &LoanRequest) -> ClientResult<LoanReply> {
        let user_id = request.user_id.trim();
        let isbn = request.isbn.trim();
        if user_id.is_empty() || isbn.is_empty() {
            let err = ClientError::Validation("user_id and isbn are required".to_string());
            self.announcer.error(Message::LoanRejected {
                reason: Some(err.to_string()),
            });
            return Err(err);
        }

        let mut fields = vec![
            ("user_id".to_string(), user_id.to_string()),
            ("isbn".to_string(), isbn.to_string()),
            ("redirect".to_string(), "0".to_string()),
        ];
        if let Some(logged_at) = request.logged_at.as_deref().filter(|v| !v.is_empty()) {
            fields.push(("logged_at".to_string(), logged_at.to_string()));
        }

        let action = format!("/do/{}", request.action);
        tracing::info!("Recording {} of {} for user {}", request.action, isbn, user_id);

        let raw = match self.transport.post_form(&action, &fields).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("{} request failed: {}", action, e);
                self.announcer.error(Message::CommunicationError);
                return Err(e);
            }
        };

        if !raw.is_json() {
            tracing::warn!("{} returned a non-JSON response (status {})", action, raw.status);
            self.announcer.error(Message::UnexpectedResponse);
            return Err(ClientError::InvalidState(format!(
                "unexpected response from {} (status {})",
                action, raw.status
            )));
        }

        let reply: LoanReply = match serde_json::from_str(&raw.body) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("{} reply could not be decoded: {}", action, e);
                self.announcer.error(Message::CommunicationError);
                return Err(e.into());
            }
        };

        if reply.ok {
            self.announcer.success(Message::LoanRecorded {
                action: request.action,
                isbn: reply.isbn.clone().unwrap_or_else(|| isbn.to_string()),
            });
        } else {
            tracing::warn!(
                "{} rejected: {}",
                action,
                reply.failure_reason().unwrap_or("no reason given")
            );
            self.announcer.error(Message::LoanRejected {
                reason: reply.failure_reason().map(str::to_string),
            });
        }
        Ok(reply)
    }
}
