//! Background submission of the creation forms
//!
//! One [`EntitySubmitter`] is bound to each creation form. On success the new
//! entity is spliced into the companion select so the page does not need a
//! reload; anything the submitter cannot make sense of forces a reload instead.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    config::PageBindings,
    error::ClientResult,
    messages::Message,
    models::{BookCreated, CreatedEntity, SelectOption, SubmissionResponse, UserCreated},
    page::{upsert_option, OptionInsert, Page},
    services::{http::HttpTransport, notifier::Announcer},
};

/// Which branch a submission ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The form is not on the page
    NoForm,
    Created { id: String, insert: OptionInsert },
    Rejected { reason: Option<String> },
    /// Unexpected response, the page was reloaded
    Resynchronized,
    TransportFailed,
}

pub struct EntitySubmitter<E: CreatedEntity> {
    transport: Arc<dyn HttpTransport>,
    page: Arc<dyn Page>,
    announcer: Announcer,
    form_action: String,
    select: String,
    _entity: PhantomData<fn() -> E>,
}

pub type BookSubmitter = EntitySubmitter<BookCreated>;
pub type UserSubmitter = EntitySubmitter<UserCreated>;

impl BookSubmitter {
    pub fn for_books(
        transport: Arc<dyn HttpTransport>,
        page: Arc<dyn Page>,
        announcer: Announcer,
        bindings: &PageBindings,
    ) -> Self {
        Self::new(
            transport,
            page,
            announcer,
            &bindings.book_form_action,
            &bindings.book_select,
        )
    }
}

impl UserSubmitter {
    pub fn for_users(
        transport: Arc<dyn HttpTransport>,
        page: Arc<dyn Page>,
        announcer: Announcer,
        bindings: &PageBindings,
    ) -> Self {
        Self::new(
            transport,
            page,
            announcer,
            &bindings.user_form_action,
            &bindings.user_select,
        )
    }
}

impl<E: CreatedEntity> EntitySubmitter<E> {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        page: Arc<dyn Page>,
        announcer: Announcer,
        form_action: &str,
        select: &str,
    ) -> Self {
        Self {
            transport,
            page,
            announcer,
            form_action: form_action.to_string(),
            select: select.to_string(),
            _entity: PhantomData,
        }
    }

    /// True when the bound form exists on the page
    pub fn is_bound(&self) -> bool {
        self.page.form_fields(&self.form_action).is_some()
    }

    /// Handle one submission of the bound form.
    ///
    /// A single attempt: every failure is reported to the user, who may submit
    /// again.
    pub async fn submit(&self) -> SubmissionOutcome {
        let kind = E::KIND;
        let Some(fields) = self.page.form_fields(&self.form_action) else {
            tracing::debug!("No {} form bound to {}", kind, self.form_action);
            return SubmissionOutcome::NoForm;
        };

        tracing::info!("Submitting {} form to {}", kind, self.form_action);

        let response = match self.send(&fields).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("{} submission to {} failed: {}", kind, self.form_action, e);
                self.announcer.error(Message::CommunicationError);
                return SubmissionOutcome::TransportFailed;
            }
        };

        match response {
            SubmissionResponse::Decoded(reply) if reply.ok => match reply.created::<E>() {
                Ok(entity) => self.apply_created(entity),
                Err(e) => {
                    tracing::warn!("{} creation reply has an unexpected shape: {}", kind, e);
                    self.resynchronize()
                }
            },
            SubmissionResponse::Decoded(reply) => {
                let reason = reply.failure_reason().map(str::to_string);
                tracing::warn!(
                    "{} creation rejected: {}",
                    kind,
                    reason.as_deref().unwrap_or("no reason given")
                );
                self.announcer.error(Message::Rejected {
                    kind,
                    reason: reason.clone(),
                });
                SubmissionOutcome::Rejected { reason }
            }
            SubmissionResponse::Unrecognized(value) => {
                tracing::warn!("{} creation reply is not an `ok` envelope: {}", kind, value);
                self.resynchronize()
            }
            SubmissionResponse::Opaque { status, body } => {
                tracing::warn!(
                    "{} creation returned a non-JSON response (status {}, {} bytes)",
                    kind,
                    status,
                    body.len()
                );
                self.resynchronize()
            }
        }
    }

    async fn send(&self, fields: &[(String, String)]) -> ClientResult<SubmissionResponse> {
        let raw = self.transport.post_form(&self.form_action, fields).await?;
        SubmissionResponse::from_raw(raw)
    }

    fn apply_created(&self, entity: E) -> SubmissionOutcome {
        let id = entity.id();
        let option = SelectOption::new(id.clone(), entity.label());
        let insert = upsert_option(self.page.as_ref(), &self.select, option);
        tracing::info!("{} {} created ({:?})", E::KIND, id, insert);

        self.announcer.success(Message::Created {
            kind: E::KIND,
            name: entity.display_name(),
        });
        self.page.reset_form(&self.form_action);

        SubmissionOutcome::Created { id, insert }
    }

    fn resynchronize(&self) -> SubmissionOutcome {
        self.announcer.error(Message::UnexpectedResponse);
        self.page.reload();
        SubmissionOutcome::Resynchronized
    }
}
