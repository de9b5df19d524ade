//! Mapping between persisted [`SpaceRecord`]s and wizard [`SpaceDraft`]s.
//!
//! Both directions are pure and total. Missing persisted values map to the
//! draft's empty defaults; nothing here fails.

use crate::draft_store::DraftStore;
use crate::space_draft::{
    CoverPage, Design, ProjectDetails, Section, SectionValue, SpaceDraft, TestimonialPage,
    TestimonialType, ThankYou, UserInformation,
};
use crate::space_palette::{self, DEFAULT_BUTTON_COLOR};
use crate::space_record::{SpaceDetails, SpaceRecord};

// ---------------------------------------------------------------------------
// Record -> draft
// ---------------------------------------------------------------------------

/// Build the draft an edit session starts from.
///
/// With `details == None` only the identity fields are populated.
pub fn hydrate_draft(record: &SpaceRecord) -> SpaceDraft {
    let project_details = ProjectDetails {
        project_name: record.name.clone(),
        project_slug: record.slug.clone(),
    };
    match &record.details {
        Some(details) => SpaceDraft {
            project_details,
            ..draft_from_details(details)
        },
        None => SpaceDraft {
            project_details,
            ..SpaceDraft::default()
        },
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn flag(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

fn list(value: &Option<Vec<String>>) -> Vec<String> {
    value.clone().unwrap_or_default()
}

/// Map detail columns onto every non-identity section.
fn draft_from_details(details: &SpaceDetails) -> SpaceDraft {
    let btn_color = details
        .btn_color
        .as_deref()
        .filter(|c| space_palette::is_valid_hex_color(c))
        .unwrap_or(DEFAULT_BUTTON_COLOR)
        .to_string();

    SpaceDraft {
        project_details: ProjectDetails::default(),
        cover_page: CoverPage {
            title: text(&details.cover_page_title),
            description: text(&details.cover_page_description),
            logo: details
                .cover_page_image_url
                .clone()
                .filter(|url| !url.is_empty()),
            btn_text: text(&details.cover_page_btn_text),
        },
        user_information: UserInformation {
            user_photo: flag(details.user_photo),
            first_name: flag(details.user_first_name),
            last_name: flag(details.user_last_name),
            email: flag(details.user_email),
            job_title: flag(details.user_job_title),
            company: flag(details.user_company),
        },
        testimonial_type: TestimonialType {
            text: flag(details.testimonial_text_type),
            video: flag(details.testimonial_video_type),
        },
        testimonial_page: TestimonialPage {
            title: text(&details.testimonial_page_title),
            description: text(&details.testimonial_page_description),
            tags: list(&details.tags),
            question_header: text(&details.question_header),
            questions: list(&details.questions),
        },
        thank_you: ThankYou {
            title: text(&details.thankyou_title),
            description: text(&details.thankyou_message),
        },
        design: Design {
            gradient_type: space_palette::clamp_gradient(details.theme),
            btn_color,
        },
    }
}

/// The value of one section as represented by `details`.
///
/// Identity is not part of the details; asking for it yields an empty
/// [`ProjectDetails`].
pub fn section_from_details(details: &SpaceDetails, section: Section) -> SectionValue {
    draft_from_details(details).section(section)
}

// ---------------------------------------------------------------------------
// Draft -> record
// ---------------------------------------------------------------------------

/// Serialize every non-identity section into detail columns.
pub fn details_from_draft(draft: &SpaceDraft) -> SpaceDetails {
    let mut details = SpaceDetails::default();
    for section in Section::ALL {
        apply_section(&mut details, &draft.section(section));
    }
    details
}

/// Overwrite only the columns belonging to `value`'s section.
///
/// Project details live on the space row itself, not in the details, so
/// they leave `details` untouched.
pub fn apply_section(details: &mut SpaceDetails, value: &SectionValue) {
    match value {
        SectionValue::ProjectDetails(_) => {}
        SectionValue::CoverPage(v) => {
            details.cover_page_title = Some(v.title.clone());
            details.cover_page_description = Some(v.description.clone());
            details.cover_page_image_url = v.logo.clone();
            details.cover_page_btn_text = Some(v.btn_text.clone());
        }
        SectionValue::UserInformation(v) => {
            details.user_photo = Some(v.user_photo);
            details.user_first_name = Some(v.first_name);
            details.user_last_name = Some(v.last_name);
            details.user_email = Some(v.email);
            details.user_job_title = Some(v.job_title);
            details.user_company = Some(v.company);
        }
        SectionValue::TestimonialType(v) => {
            details.testimonial_text_type = Some(v.text);
            details.testimonial_video_type = Some(v.video);
        }
        SectionValue::TestimonialPage(v) => {
            details.testimonial_page_title = Some(v.title.clone());
            details.testimonial_page_description = Some(v.description.clone());
            details.tags = Some(v.tags.clone());
            details.question_header = Some(v.question_header.clone());
            details.questions = Some(v.questions.clone());
        }
        SectionValue::ThankYou(v) => {
            details.thankyou_title = Some(v.title.clone());
            details.thankyou_message = Some(v.description.clone());
        }
        SectionValue::Design(v) => {
            details.theme = Some(i32::from(v.gradient_type));
            details.btn_color = Some(v.btn_color.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Once-per-mount loader
// ---------------------------------------------------------------------------

/// Seeds a [`DraftStore`] from a record exactly once.
///
/// The edit wizard fetches its record once upstream; re-running the load on
/// a later render would clobber the user's in-progress edits.
#[derive(Debug, Default)]
pub struct Reconciler {
    loaded: bool,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Populate `store` from `record` on the first call. Later calls are
    /// no-ops and return `false`.
    pub fn load_once(&mut self, store: &mut DraftStore, record: &SpaceRecord) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;

        let draft = hydrate_draft(record);
        store.set_project_details(draft.project_details.clone());
        if record.details.is_some() {
            for section in &Section::ALL[1..] {
                store.set(draft.section(*section));
            }
        }

        tracing::debug!(
            space_id = record.id,
            slug = %record.slug,
            has_details = record.details.is_some(),
            "Draft store reconciled from space record"
        );
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
