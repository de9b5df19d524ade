//! Domain layer for Viewus spaces.
//!
//! A *space* is a business's testimonial-collection form. This crate holds
//! the space configuration model and everything that manipulates it without
//! touching I/O: section validation, the draft store that backs the
//! multi-step configuration wizard, the wizard state machine, the mapping
//! between persisted records and drafts, and the gateway trait through which
//! the wizard persists its work.

pub mod draft_store;
pub mod error;
pub mod gateway;
pub mod reconcile;
pub mod search;
pub mod space_draft;
pub mod space_palette;
pub mod space_record;
pub mod space_validation;
pub mod space_wizard;
pub mod submission;
pub mod types;
pub mod wall_of_love;
pub mod wizard_session;
