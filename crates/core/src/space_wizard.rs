//! Space configuration wizard: steps, modes, and navigation.
//!
//! The wizard is a seven-step finite state machine. Pages arrive as plain
//! integers (usually from a `?page=N` query parameter) and are mapped onto
//! [`WizardStep`] by a total function, so a hand-edited URL always lands on
//! a defined step. Step ordering is not enforced: any step can be entered
//! directly and renders whatever the draft currently holds.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::space_draft::Section;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Whether the wizard is creating a new space or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardMode {
    /// The draft is submitted whole after the last step.
    Create,
    /// Each step saves its own section before advancing.
    Edit,
}

impl WizardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The seven steps of the space wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ProjectDetails,
    CoverPage,
    UserInformation,
    TestimonialType,
    TestimonialPage,
    ThankYou,
    Design,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 7;

/// Minimum page number (1-based).
pub const MIN_PAGE: u8 = 1;

/// Maximum page number (1-based).
pub const MAX_PAGE: u8 = 7;

impl WizardStep {
    /// Map a 1-based page number onto a step.
    ///
    /// Total: anything outside `1..=7` lands on the first step.
    pub fn from_page(page: i64) -> Self {
        match page {
            1 => Self::ProjectDetails,
            2 => Self::CoverPage,
            3 => Self::UserInformation,
            4 => Self::TestimonialType,
            5 => Self::TestimonialPage,
            6 => Self::ThankYou,
            7 => Self::Design,
            _ => Self::first(),
        }
    }

    /// Convert to a 1-based page number.
    pub fn to_page(self) -> u8 {
        match self {
            Self::ProjectDetails => 1,
            Self::CoverPage => 2,
            Self::UserInformation => 3,
            Self::TestimonialType => 4,
            Self::TestimonialPage => 5,
            Self::ThankYou => 6,
            Self::Design => 7,
        }
    }

    pub fn first() -> Self {
        Self::ProjectDetails
    }

    pub fn last() -> Self {
        Self::Design
    }

    pub fn is_last(self) -> bool {
        self == Self::last()
    }

    /// The draft section this step reads and writes.
    pub fn section(self) -> Section {
        match self {
            Self::ProjectDetails => Section::ProjectDetails,
            Self::CoverPage => Section::CoverPage,
            Self::UserInformation => Section::UserInformation,
            Self::TestimonialType => Section::TestimonialType,
            Self::TestimonialPage => Section::TestimonialPage,
            Self::ThankYou => Section::ThankYou,
            Self::Design => Section::Design,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::ProjectDetails => "Project Details",
            Self::CoverPage => "Cover Page",
            Self::UserInformation => "User Information",
            Self::TestimonialType => "Testimonial Type",
            Self::TestimonialPage => "Testimonial Page",
            Self::ThankYou => "Thank You Page",
            Self::Design => "Design",
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Navigation requests the wizard understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// "Back" button.
    Back,
    /// "Continue" / "Save & Next" after the step's section was accepted.
    Advance,
    /// Direct navigation to a page number (URL edit, browser history).
    GoTo(i64),
}

/// Total transition function.
///
/// `Back` on the first step and `Advance` on the last step stay put; the
/// final submit after the last step belongs to the session controller.
pub fn transition(step: WizardStep, action: WizardAction) -> WizardStep {
    let page = i64::from(step.to_page());
    match action {
        WizardAction::Back if step == WizardStep::first() => step,
        WizardAction::Back => WizardStep::from_page(page - 1),
        WizardAction::Advance if step.is_last() => step,
        WizardAction::Advance => WizardStep::from_page(page + 1),
        WizardAction::GoTo(target) => WizardStep::from_page(target),
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Name of the query parameter carrying the page number.
pub const PAGE_QUERY_PARAM: &str = "page";

/// Navigable URL path of a wizard step.
///
/// Create flows live at `/space/create?page=N`; edit flows at
/// `/space/{slug}/edit?page=N`.
pub fn location(mode: WizardMode, slug: &str, step: WizardStep) -> String {
    let page = step.to_page();
    match mode {
        WizardMode::Create => format!("/space/create?{PAGE_QUERY_PARAM}={page}"),
        WizardMode::Edit => format!("/space/{slug}/edit?{PAGE_QUERY_PARAM}={page}"),
    }
}

/// Resolve the step named by a URL query string (with or without a leading
/// `?`). Missing or unparseable pages resolve to the first step.
pub fn step_from_query(query: &str) -> WizardStep {
    let page = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == PAGE_QUERY_PARAM)
        .and_then(|(_, value)| value.trim().parse::<i64>().ok());
    page.map_or_else(WizardStep::first, WizardStep::from_page)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
