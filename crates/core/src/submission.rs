//! Customer-facing review form driven by a configured space.
//!
//! The user-information flags chosen in the wizard decide which customer
//! details the public form demands; the testimonial-type flags decide which
//! kind of review it collects.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::space_draft::{
    CoverPage, Design, SpaceDraft, TestimonialPage, TestimonialType, ThankYou, UserInformation,
};
use crate::space_validation::{self, FieldError, FieldErrors};

/// Details a customer enters before writing or recording a review.
///
/// Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(default)]
#[ts(export)]
pub struct CustomerDetails {
    #[validate(length(min = 2, max = 50, message = "First name must be 2-50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 50, message = "Last name must be 2-50 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "Company must be at most 100 characters"))]
    pub company: Option<String>,
    #[validate(length(max = 100, message = "Job title must be at most 100 characters"))]
    pub job_title: Option<String>,
    /// Whether a photo reference was uploaded.
    pub has_photo: bool,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(space_validation::trimmed)
        .filter(|v| !v.is_empty())
}

fn required(field: &str, label: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        code: "required".to_string(),
        message: format!("{label} is required"),
    }
}

/// Check `raw` against the space's requirement flags.
///
/// Returns the normalized details, or every failing field sorted by name.
pub fn check_customer_details(
    requirements: &UserInformation,
    raw: CustomerDetails,
) -> Result<CustomerDetails, FieldErrors> {
    let details = CustomerDetails {
        first_name: present(raw.first_name),
        last_name: present(raw.last_name),
        email: present(raw.email),
        company: present(raw.company),
        job_title: present(raw.job_title),
        has_photo: raw.has_photo,
    };

    let mut errors = match details.validate() {
        Ok(()) => Vec::new(),
        Err(e) => space_validation::flatten(&e),
    };

    let demanded = [
        (requirements.first_name, details.first_name.is_some(), "first_name", "First name"),
        (requirements.last_name, details.last_name.is_some(), "last_name", "Last name"),
        (requirements.email, details.email.is_some(), "email", "Email"),
        (requirements.company, details.company.is_some(), "company", "Company"),
        (requirements.job_title, details.job_title.is_some(), "job_title", "Job title"),
        (requirements.user_photo, details.has_photo, "user_photo", "Photo"),
    ];
    errors.extend(
        demanded
            .into_iter()
            .filter(|(flagged, given, _, _)| *flagged && !*given)
            .map(|(_, _, field, label)| required(field, label)),
    );

    if errors.is_empty() {
        Ok(details)
    } else {
        errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
        Err(errors)
    }
}

// ---------------------------------------------------------------------------
// Review kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReviewKind {
    Text,
    Video,
}

/// The review format the form opens with. Text wins when enabled; a space
/// with neither flag set still collects video.
pub fn review_kind(types: &TestimonialType) -> ReviewKind {
    if types.text {
        ReviewKind::Text
    } else {
        ReviewKind::Video
    }
}

// ---------------------------------------------------------------------------
// Public form view
// ---------------------------------------------------------------------------

/// Everything the public review form needs to render a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReviewForm {
    pub name: String,
    pub slug: String,
    pub cover_page: CoverPage,
    pub requirements: UserInformation,
    pub testimonial_type: TestimonialType,
    pub review_kind: ReviewKind,
    pub testimonial_page: TestimonialPage,
    pub thank_you: ThankYou,
    pub design: Design,
}

impl ReviewForm {
    pub fn from_draft(draft: SpaceDraft) -> Self {
        Self {
            name: draft.project_details.project_name,
            slug: draft.project_details.project_slug,
            cover_page: draft.cover_page,
            requirements: draft.user_information,
            review_kind: review_kind(&draft.testimonial_type),
            testimonial_type: draft.testimonial_type,
            testimonial_page: draft.testimonial_page,
            thank_you: draft.thank_you,
            design: draft.design,
        }
    }
}
