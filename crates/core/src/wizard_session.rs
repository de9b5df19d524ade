//! Wizard controller: one create or edit session over a [`DraftStore`].
//!
//! The session decides which step is shown, accepts each step's section,
//! and talks to the [`PersistenceGateway`]:
//!
//! - **create**: sections accumulate in the draft and the whole snapshot is
//!   submitted once, after the last step;
//! - **edit**: every step saves its own section before advancing. Identity
//!   (name and slug) is read-only once a space exists.
//!
//! A save is split into [`WizardSession::begin_save`] and
//! [`WizardSession::complete_save`]. While a save is pending the step's
//! action is disabled ([`WizardSession::can_continue`]), and a response that
//! arrives after the same section was edited locally is discarded instead of
//! overwriting the newer edit.

use crate::draft_store::{DraftStore, Revision};
use crate::gateway::{GatewayError, PersistenceGateway};
use crate::reconcile::Reconciler;
use crate::space_draft::{Section, SectionValue, SpaceDraft};
use crate::space_record::{CreatedSpace, SpaceRecord};
use crate::space_validation::{self, FieldErrors};
use crate::space_wizard::{self, WizardAction, WizardMode, WizardStep};

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Why a step could not advance. Every variant leaves the draft intact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Section is invalid")]
    Validation(FieldErrors),

    #[error("Step {step:?} expects section '{expected}', got '{got}'")]
    WrongSection {
        step: WizardStep,
        expected: Section,
        got: Section,
    },

    #[error("A save is already in progress")]
    SaveInFlight,

    #[error("Save is only available when editing an existing space")]
    NotEditing,

    #[error("The space was already created")]
    AlreadySubmitted,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl WizardError {
    /// Whether the user can retry the same action without changing input.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(err) => err.is_retryable(),
            Self::SaveInFlight => true,
            _ => false,
        }
    }
}

/// Result of a successful "Continue".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The section was accepted and the wizard moved on.
    Advanced(WizardStep),
    /// The final create-mode step submitted the draft.
    Submitted(CreatedSpace),
}

/// A section save that has been sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub section: Section,
    /// Store revision of `section` when the save was issued.
    pub revision: Revision,
    pub value: SectionValue,
}

/// What happened to a completed save's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The stored section was applied to the draft.
    Applied,
    /// The section changed locally while the save was pending; the response
    /// was dropped.
    Stale,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One mounted wizard.
pub struct WizardSession<'g> {
    gateway: &'g dyn PersistenceGateway,
    store: DraftStore,
    reconciler: Reconciler,
    mode: WizardMode,
    step: WizardStep,
    space: Option<CreatedSpace>,
    in_flight: Option<Section>,
}

impl<'g> WizardSession<'g> {
    /// Mount a create flow at `page` with an empty draft.
    pub fn create(gateway: &'g dyn PersistenceGateway, page: i64) -> Self {
        let mut store = DraftStore::create();
        store.initialize_space_data();
        Self {
            gateway,
            store,
            reconciler: Reconciler::new(),
            mode: WizardMode::Create,
            step: WizardStep::from_page(page),
            space: None,
            in_flight: None,
        }
    }

    /// Mount an edit flow at `page`, seeding the draft from `record`.
    pub fn edit(gateway: &'g dyn PersistenceGateway, record: &SpaceRecord, page: i64) -> Self {
        let mut session = Self {
            gateway,
            store: DraftStore::create(),
            reconciler: Reconciler::new(),
            mode: WizardMode::Edit,
            step: WizardStep::from_page(page),
            space: Some(CreatedSpace {
                id: record.id,
                slug: record.slug.clone(),
            }),
            in_flight: None,
        };
        session.reload(record);
        session
    }

    /// Fetch the space by slug and mount an edit flow for it.
    pub async fn open_edit(
        gateway: &'g dyn PersistenceGateway,
        slug: &str,
        page: i64,
    ) -> Result<Self, WizardError> {
        let record = gateway.fetch(slug).await?;
        Ok(Self::edit(gateway, &record, page))
    }

    /// Re-run reconciliation. Only the first call per session has an effect.
    pub fn reload(&mut self, record: &SpaceRecord) -> bool {
        self.reconciler.load_once(&mut self.store, record)
    }

    // -- read access --

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    /// The step to render.
    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    /// Navigable URL of the current step.
    pub fn location(&self) -> String {
        let slug = self.space.as_ref().map_or("", |s| s.slug.as_str());
        space_wizard::location(self.mode, slug, self.step)
    }

    /// Copy of the whole draft.
    pub fn draft(&self) -> SpaceDraft {
        self.store.snapshot()
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    /// Mutable draft access for optimistic in-step edits (design swatches,
    /// colour picker) that do not advance the wizard.
    pub fn store_mut(&mut self) -> &mut DraftStore {
        &mut self.store
    }

    /// Identity of the space being edited, or created by the final submit.
    pub fn space(&self) -> Option<&CreatedSpace> {
        self.space.as_ref()
    }

    /// Whether the current step's action is enabled.
    pub fn can_continue(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Initial form values of the current step.
    pub fn step_values(&self) -> SectionValue {
        self.store.get(self.step.section())
    }

    // -- navigation --

    pub fn back(&mut self) -> WizardStep {
        self.navigate(WizardAction::Back)
    }

    /// Jump to any page; out-of-range pages land on the first step.
    pub fn go_to(&mut self, page: i64) -> WizardStep {
        self.navigate(WizardAction::GoTo(page))
    }

    fn navigate(&mut self, action: WizardAction) -> WizardStep {
        let from = self.step;
        self.step = space_wizard::transition(from, action);
        tracing::debug!(
            mode = self.mode.as_str(),
            from = from.to_page(),
            to = self.step.to_page(),
            "Wizard navigated"
        );
        self.step
    }

    // -- continue --

    /// Accept the current step's section and move on.
    ///
    /// Invalid input is reported without touching the draft. Gateway
    /// failures keep the accepted section in the draft and the wizard on the
    /// current step so the action can be retried.
    pub async fn continue_with(&mut self, raw: SectionValue) -> Result<StepOutcome, WizardError> {
        if self.in_flight.is_some() {
            return Err(WizardError::SaveInFlight);
        }

        let expected = self.step.section();
        if raw.section() != expected {
            return Err(WizardError::WrongSection {
                step: self.step,
                expected,
                got: raw.section(),
            });
        }

        if self.mode == WizardMode::Edit && expected == Section::ProjectDetails {
            return Ok(StepOutcome::Advanced(self.navigate(WizardAction::Advance)));
        }

        let valid = space_validation::validate_section(raw).map_err(WizardError::Validation)?;
        self.store.set(valid);

        match self.mode {
            WizardMode::Create if self.step.is_last() => self.submit().await,
            WizardMode::Create => Ok(StepOutcome::Advanced(self.navigate(WizardAction::Advance))),
            WizardMode::Edit => {
                let pending = self.begin_save(expected)?;
                let id = self.space.as_ref().map(|s| s.id).ok_or(WizardError::NotEditing)?;
                let response = self.gateway.update(id, &pending.value).await;
                self.complete_save(pending, response)?;
                Ok(StepOutcome::Advanced(self.navigate(WizardAction::Advance)))
            }
        }
    }

    /// Send the whole draft to the gateway. Create mode only, once.
    async fn submit(&mut self) -> Result<StepOutcome, WizardError> {
        if self.space.is_some() {
            return Err(WizardError::AlreadySubmitted);
        }
        let draft = self.store.snapshot();

        self.in_flight = Some(self.step.section());
        let result = self.gateway.create(&draft).await;
        self.in_flight = None;

        match result {
            Ok(created) => {
                tracing::info!(
                    space_id = created.id,
                    slug = %created.slug,
                    "Space created from wizard draft"
                );
                self.space = Some(created.clone());
                Ok(StepOutcome::Submitted(created))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    slug = %draft.project_details.project_slug,
                    "Space creation failed; draft retained"
                );
                Err(err.into())
            }
        }
    }

    // -- edit-mode saves --

    /// Mark `section` as saving and capture what will be sent.
    pub fn begin_save(&mut self, section: Section) -> Result<PendingSave, WizardError> {
        if self.mode != WizardMode::Edit || self.space.is_none() {
            return Err(WizardError::NotEditing);
        }
        if self.in_flight.is_some() {
            return Err(WizardError::SaveInFlight);
        }
        self.in_flight = Some(section);
        Ok(PendingSave {
            section,
            revision: self.store.revision(section),
            value: self.store.get(section),
        })
    }

    /// Apply a gateway response to the draft.
    ///
    /// Responses for a section that changed since [`begin_save`](Self::begin_save)
    /// are discarded. Errors are returned unchanged and leave the draft as is.
    pub fn complete_save(
        &mut self,
        pending: PendingSave,
        response: Result<SectionValue, GatewayError>,
    ) -> Result<SaveOutcome, WizardError> {
        if self.in_flight == Some(pending.section) {
            self.in_flight = None;
        }

        let stored = match response {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(
                    section = %pending.section,
                    error = %err,
                    "Section save failed; draft retained"
                );
                return Err(err.into());
            }
        };

        if self.store.revision(pending.section) != pending.revision {
            tracing::warn!(
                section = %pending.section,
                sent_revision = pending.revision,
                current_revision = self.store.revision(pending.section),
                "Discarding stale save response"
            );
            return Ok(SaveOutcome::Stale);
        }

        if self.store.get(pending.section) != stored {
            self.store.set(stored);
        }
        tracing::info!(
            section = %pending.section,
            space_id = self.space.as_ref().map(|s| s.id),
            "Section saved"
        );
        Ok(SaveOutcome::Applied)
    }

    /// Unmount the wizard, discarding the draft. Returns the final snapshot.
    pub fn finish(self) -> SpaceDraft {
        let snapshot = self.store.snapshot();
        self.store.dispose();
        snapshot
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
