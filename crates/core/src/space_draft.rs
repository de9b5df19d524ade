//! The in-progress configuration of a space.
//!
//! A [`SpaceDraft`] is split into seven independent [`Section`]s, one per
//! wizard step. Each section is replaced as a whole; there is no field-level
//! merge anywhere in the draft pipeline. Validation rules live on the section
//! types (see [`crate::space_validation`] for the entry points).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::space_palette::{DEFAULT_BUTTON_COLOR, DEFAULT_GRADIENT_ID};

// ---------------------------------------------------------------------------
// Section names
// ---------------------------------------------------------------------------

/// The seven independent groupings that compose a [`SpaceDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Section {
    ProjectDetails,
    CoverPage,
    UserInformation,
    TestimonialType,
    TestimonialPage,
    ThankYou,
    Design,
}

impl Section {
    /// All sections in wizard order.
    pub const ALL: [Section; 7] = [
        Section::ProjectDetails,
        Section::CoverPage,
        Section::UserInformation,
        Section::TestimonialType,
        Section::TestimonialPage,
        Section::ThankYou,
        Section::Design,
    ];

    /// Zero-based position, used to index per-section bookkeeping.
    pub fn index(self) -> usize {
        match self {
            Self::ProjectDetails => 0,
            Self::CoverPage => 1,
            Self::UserInformation => 2,
            Self::TestimonialType => 3,
            Self::TestimonialPage => 4,
            Self::ThankYou => 5,
            Self::Design => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectDetails => "project_details",
            Self::CoverPage => "cover_page",
            Self::UserInformation => "user_information",
            Self::TestimonialType => "testimonial_type",
            Self::TestimonialPage => "testimonial_page",
            Self::ThankYou => "thank_you",
            Self::Design => "design",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Section types
// ---------------------------------------------------------------------------

/// Identity of the space. The slug must be URL-safe and globally unique;
/// uniqueness is the persistence gateway's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct ProjectDetails {
    #[validate(length(min = 1, max = 50, message = "Project name must be 1-50 characters"))]
    pub project_name: String,
    #[validate(custom(function = "crate::space_validation::validate_slug_format"))]
    pub project_slug: String,
}

/// Landing card shown to customers before they write a testimonial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct CoverPage {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
    /// Opaque reference returned by image storage.
    #[validate(url(message = "Logo must be a URL"))]
    pub logo: Option<String>,
    #[validate(length(min = 1, max = 30, message = "Button text must be 1-30 characters"))]
    pub btn_text: String,
}

/// Which customer details the submission form makes mandatory.
///
/// Every field is a "required" flag, not a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct UserInformation {
    pub user_photo: bool,
    pub first_name: bool,
    pub last_name: bool,
    pub email: bool,
    pub job_title: bool,
    pub company: bool,
}

/// Which testimonial formats the space accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct TestimonialType {
    pub text: bool,
    pub video: bool,
}

/// The page where the customer writes or records the testimonial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct TestimonialPage {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
    #[validate(custom(function = "crate::space_validation::validate_tags"))]
    pub tags: Vec<String>,
    #[validate(length(max = 100, message = "Question header must be at most 100 characters"))]
    pub question_header: String,
    #[validate(custom(function = "crate::space_validation::validate_questions"))]
    pub questions: Vec<String>,
}

/// Message shown after a testimonial is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct ThankYou {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
}

/// Visual theme of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct Design {
    #[validate(custom(function = "crate::space_validation::validate_gradient"))]
    pub gradient_type: u8,
    #[validate(custom(function = "crate::space_validation::validate_hex_color"))]
    pub btn_color: String,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            gradient_type: DEFAULT_GRADIENT_ID,
            btn_color: DEFAULT_BUTTON_COLOR.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Draft aggregate
// ---------------------------------------------------------------------------

/// The whole space configuration as edited by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct SpaceDraft {
    pub project_details: ProjectDetails,
    pub cover_page: CoverPage,
    pub user_information: UserInformation,
    pub testimonial_type: TestimonialType,
    pub testimonial_page: TestimonialPage,
    pub thank_you: ThankYou,
    pub design: Design,
}

impl SpaceDraft {
    /// Extract one section as a [`SectionValue`].
    pub fn section(&self, section: Section) -> SectionValue {
        match section {
            Section::ProjectDetails => SectionValue::ProjectDetails(self.project_details.clone()),
            Section::CoverPage => SectionValue::CoverPage(self.cover_page.clone()),
            Section::UserInformation => SectionValue::UserInformation(self.user_information),
            Section::TestimonialType => SectionValue::TestimonialType(self.testimonial_type),
            Section::TestimonialPage => SectionValue::TestimonialPage(self.testimonial_page.clone()),
            Section::ThankYou => SectionValue::ThankYou(self.thank_you.clone()),
            Section::Design => SectionValue::Design(self.design.clone()),
        }
    }

    /// Replace one section wholesale.
    pub fn replace(&mut self, value: SectionValue) {
        match value {
            SectionValue::ProjectDetails(v) => self.project_details = v,
            SectionValue::CoverPage(v) => self.cover_page = v,
            SectionValue::UserInformation(v) => self.user_information = v,
            SectionValue::TestimonialType(v) => self.testimonial_type = v,
            SectionValue::TestimonialPage(v) => self.testimonial_page = v,
            SectionValue::ThankYou(v) => self.thank_you = v,
            SectionValue::Design(v) => self.design = v,
        }
    }
}

/// Exactly one section of a draft; the unit of an edit-mode save.
///
/// Serialized as `{"section": "design", "value": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "section", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum SectionValue {
    ProjectDetails(ProjectDetails),
    CoverPage(CoverPage),
    UserInformation(UserInformation),
    TestimonialType(TestimonialType),
    TestimonialPage(TestimonialPage),
    ThankYou(ThankYou),
    Design(Design),
}

impl SectionValue {
    pub fn section(&self) -> Section {
        match self {
            Self::ProjectDetails(_) => Section::ProjectDetails,
            Self::CoverPage(_) => Section::CoverPage,
            Self::UserInformation(_) => Section::UserInformation,
            Self::TestimonialType(_) => Section::TestimonialType,
            Self::TestimonialPage(_) => Section::TestimonialPage,
            Self::ThankYou(_) => Section::ThankYou,
            Self::Design(_) => Section::Design,
        }
    }
}
