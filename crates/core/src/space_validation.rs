//! Pure validation for draft sections.
//!
//! Each `validate_*` function takes the raw field values a wizard step
//! collected, normalizes them (trimming text, dropping blank list entries),
//! and returns either the validated section or the list of field errors.
//! Nothing here renders or performs I/O, so the same checks run in the
//! wizard before a step advances and in the API before a section is stored.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::space_draft::{
    CoverPage, Design, ProjectDetails, Section, SectionValue, SpaceDraft, TestimonialPage,
    ThankYou,
};
use crate::space_palette;

/// Maximum slug length, matching the `spaces.slug` column.
pub const MAX_SLUG_LEN: usize = 50;

/// Maximum number of tags on the testimonial page.
pub const MAX_TAGS: usize = 10;
/// Maximum characters per tag.
pub const MAX_TAG_LEN: usize = 30;

/// Maximum number of prompt questions on the testimonial page.
pub const MAX_QUESTIONS: usize = 10;
/// Maximum characters per question.
pub const MAX_QUESTION_LEN: usize = 200;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Sorted list of field errors for one section.
pub type FieldErrors = Vec<FieldError>;

/// Flatten `validator` output into a deterministic list.
pub(crate) fn flatten(errors: &ValidationErrors) -> FieldErrors {
    let mut out: FieldErrors = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}

fn check<T: Validate>(value: T) -> Result<T, FieldErrors> {
    match value.validate() {
        Ok(()) => Ok(value),
        Err(errors) => Err(flatten(&errors)),
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

// ---------------------------------------------------------------------------
// Custom field validators (referenced from the section derives)
// ---------------------------------------------------------------------------

pub(crate) fn validate_slug_format(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(error("required", "Slug is required"));
    }
    if slug.chars().count() > MAX_SLUG_LEN {
        return Err(error("length", "Slug must be at most 50 characters"));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(error(
            "slug",
            "Slug may only contain lowercase letters, digits, and single hyphens",
        ));
    }
    Ok(())
}

pub(crate) fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(error("too_many", "At most 10 tags are allowed"));
    }
    if tags.iter().any(|t| t.chars().count() > MAX_TAG_LEN) {
        return Err(error("length", "Each tag must be at most 30 characters"));
    }
    Ok(())
}

pub(crate) fn validate_questions(questions: &[String]) -> Result<(), ValidationError> {
    if questions.len() > MAX_QUESTIONS {
        return Err(error("too_many", "At most 10 questions are allowed"));
    }
    if questions
        .iter()
        .any(|q| q.chars().count() > MAX_QUESTION_LEN)
    {
        return Err(error("length", "Each question must be at most 200 characters"));
    }
    Ok(())
}

pub(crate) fn validate_gradient(id: u8) -> Result<(), ValidationError> {
    if !space_palette::is_known_gradient(id) {
        return Err(error("gradient", "Unknown background gradient"));
    }
    Ok(())
}

pub(crate) fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if !space_palette::is_valid_hex_color(value) {
        return Err(error("hex_color", "Invalid hex color code"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

pub(crate) fn trimmed(value: String) -> String {
    let t = value.trim();
    if t.len() == value.len() {
        value
    } else {
        t.to_string()
    }
}

fn trimmed_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(trimmed)
        .filter(|v| !v.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Per-section entry points
// ---------------------------------------------------------------------------

pub fn validate_project_details(raw: ProjectDetails) -> Result<ProjectDetails, FieldErrors> {
    check(ProjectDetails {
        project_name: trimmed(raw.project_name),
        project_slug: trimmed(raw.project_slug),
    })
}

pub fn validate_cover_page(raw: CoverPage) -> Result<CoverPage, FieldErrors> {
    check(CoverPage {
        title: trimmed(raw.title),
        description: trimmed(raw.description),
        logo: raw.logo.map(trimmed).filter(|l| !l.is_empty()),
        btn_text: trimmed(raw.btn_text),
    })
}

pub fn validate_testimonial_page(raw: TestimonialPage) -> Result<TestimonialPage, FieldErrors> {
    check(TestimonialPage {
        title: trimmed(raw.title),
        description: trimmed(raw.description),
        tags: trimmed_list(raw.tags),
        question_header: trimmed(raw.question_header),
        questions: trimmed_list(raw.questions),
    })
}

pub fn validate_thank_you(raw: ThankYou) -> Result<ThankYou, FieldErrors> {
    check(ThankYou {
        title: trimmed(raw.title),
        description: trimmed(raw.description),
    })
}

pub fn validate_design(raw: Design) -> Result<Design, FieldErrors> {
    check(Design {
        gradient_type: raw.gradient_type,
        btn_color: trimmed(raw.btn_color),
    })
}

/// Validate any section.
///
/// User-information and testimonial-type sections are plain flag sets and
/// always pass.
pub fn validate_section(raw: SectionValue) -> Result<SectionValue, FieldErrors> {
    Ok(match raw {
        SectionValue::ProjectDetails(v) => {
            SectionValue::ProjectDetails(validate_project_details(v)?)
        }
        SectionValue::CoverPage(v) => SectionValue::CoverPage(validate_cover_page(v)?),
        SectionValue::TestimonialPage(v) => {
            SectionValue::TestimonialPage(validate_testimonial_page(v)?)
        }
        SectionValue::ThankYou(v) => SectionValue::ThankYou(validate_thank_you(v)?),
        SectionValue::Design(v) => SectionValue::Design(validate_design(v)?),
        flags @ (SectionValue::UserInformation(_) | SectionValue::TestimonialType(_)) => flags,
    })
}

/// Validate every section of a draft submitted in one piece.
///
/// Field names are prefixed with their section, e.g. `cover_page.title`.
pub fn validate_draft(raw: SpaceDraft) -> Result<SpaceDraft, FieldErrors> {
    let mut draft = SpaceDraft::default();
    let mut errors = FieldErrors::new();
    for section in Section::ALL {
        match validate_section(raw.section(section)) {
            Ok(value) => draft.replace(value),
            Err(errs) => errors.extend(errs.into_iter().map(|e| FieldError {
                field: format!("{section}.{}", e.field),
                ..e
            })),
        }
    }
    if errors.is_empty() {
        Ok(draft)
    } else {
        Err(errors)
    }
}

/// Whether a step holding `raw` may advance. Drives the enabled state of
/// the "Continue" control.
pub fn can_advance(raw: &SectionValue) -> bool {
    validate_section(raw.clone()).is_ok()
}

/// Whether `slug` is a well-formed space slug.
pub fn is_valid_slug(slug: &str) -> bool {
    validate_slug_format(slug).is_ok()
}

/// Derive a candidate slug from a project name.
///
/// Lowercases, replaces every run of non-alphanumeric characters with a
/// single hyphen, and trims hyphens from both ends. May return an empty
/// string for names with no ASCII alphanumerics.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space_draft::{TestimonialType, UserInformation};

    fn fields(errors: &FieldErrors) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    // -- project details --

    #[test]
    fn project_details_trims_and_accepts() {
        let ok = validate_project_details(ProjectDetails {
            project_name: "  Acme  ".into(),
            project_slug: " acme ".into(),
        })
        .unwrap();
        assert_eq!(ok.project_name, "Acme");
        assert_eq!(ok.project_slug, "acme");
    }

    #[test]
    fn project_details_requires_name_and_slug() {
        let errors = validate_project_details(ProjectDetails::default()).unwrap_err();
        assert_eq!(fields(&errors), vec!["project_name", "project_slug"]);
    }

    #[test]
    fn slug_format_rules() {
        assert!(is_valid_slug("acme"));
        assert!(is_valid_slug("acme-2024"));
        assert!(!is_valid_slug("Acme"));
        assert!(!is_valid_slug("acme--co"));
        assert!(!is_valid_slug("-acme"));
        assert!(!is_valid_slug("acme co"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug(&"a".repeat(51)));
    }

    #[test]
    fn slugify_produces_valid_slugs() {
        assert_eq!(slugify("Acme Corp"), "acme-corp");
        assert_eq!(slugify("  Hello,   World!! "), "hello-world");
        assert_eq!(slugify("Café 42"), "caf-42");
        assert_eq!(slugify("***"), "");
        let long = slugify(&"word ".repeat(30));
        assert!(long.len() <= MAX_SLUG_LEN);
        assert!(is_valid_slug(&long));
    }

    // -- cover page --

    #[test]
    fn cover_page_requires_title_and_button_text() {
        let errors = validate_cover_page(CoverPage::default()).unwrap_err();
        assert_eq!(fields(&errors), vec!["btn_text", "title"]);
    }

    #[test]
    fn cover_page_blank_logo_becomes_none() {
        let ok = validate_cover_page(CoverPage {
            title: "Share your story".into(),
            description: String::new(),
            logo: Some("   ".into()),
            btn_text: "Start".into(),
        })
        .unwrap();
        assert_eq!(ok.logo, None);
    }

    #[test]
    fn cover_page_rejects_non_url_logo() {
        let errors = validate_cover_page(CoverPage {
            title: "Share your story".into(),
            description: String::new(),
            logo: Some("not a url".into()),
            btn_text: "Start".into(),
        })
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["logo"]);
    }

    // -- testimonial page --

    #[test]
    fn testimonial_page_drops_blank_entries() {
        let ok = validate_testimonial_page(TestimonialPage {
            title: "Tell us".into(),
            description: String::new(),
            tags: vec![" fast ".into(), "".into(), "friendly".into()],
            question_header: "Questions".into(),
            questions: vec!["What did you like?".into(), "   ".into()],
        })
        .unwrap();
        assert_eq!(ok.tags, vec!["fast", "friendly"]);
        assert_eq!(ok.questions, vec!["What did you like?"]);
    }

    #[test]
    fn testimonial_page_limits_tags_and_questions() {
        let errors = validate_testimonial_page(TestimonialPage {
            title: "Tell us".into(),
            description: String::new(),
            tags: (0..11).map(|i| format!("tag{i}")).collect(),
            question_header: String::new(),
            questions: vec!["q".repeat(201)],
        })
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["questions", "tags"]);
    }

    // -- thank you --

    #[test]
    fn thank_you_requires_title() {
        let errors = validate_thank_you(ThankYou::default()).unwrap_err();
        assert_eq!(fields(&errors), vec!["title"]);
        assert_eq!(errors[0].code, "length");
    }

    // -- design --

    #[test]
    fn design_accepts_palette_and_hex() {
        let ok = validate_design(Design {
            gradient_type: 2,
            btn_color: "#71D4FF".into(),
        })
        .unwrap();
        assert_eq!(ok.btn_color, "#71D4FF");
    }

    #[test]
    fn design_rejects_bad_color_and_gradient() {
        let errors = validate_design(Design {
            gradient_type: 42,
            btn_color: "blue".into(),
        })
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["btn_color", "gradient_type"]);
        assert_eq!(errors[0].message, "Invalid hex color code");
    }

    #[test]
    fn design_gradient_must_be_in_palette() {
        for id in 0..=u8::MAX {
            let result = validate_design(Design {
                gradient_type: id,
                btn_color: "#71D4FF".into(),
            });
            assert_eq!(result.is_ok(), space_palette::is_known_gradient(id), "gradient {id}");
        }
    }

    // -- dispatch --

    #[test]
    fn flag_sections_always_validate() {
        assert!(can_advance(&SectionValue::UserInformation(
            UserInformation::default()
        )));
        assert!(can_advance(&SectionValue::TestimonialType(
            TestimonialType::default()
        )));
    }

    #[test]
    fn can_advance_reflects_validation() {
        assert!(!can_advance(&SectionValue::ThankYou(ThankYou::default())));
        assert!(can_advance(&SectionValue::ThankYou(ThankYou {
            title: "Thank you!".into(),
            description: String::new(),
        })));
    }

    // -- whole draft --

    #[test]
    fn draft_errors_are_prefixed_by_section() {
        let mut raw = SpaceDraft::default();
        raw.project_details = ProjectDetails {
            project_name: "Acme".into(),
            project_slug: "acme".into(),
        };
        raw.design.btn_color = "teal".into();

        let errors = validate_draft(raw).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![
                "cover_page.btn_text",
                "cover_page.title",
                "testimonial_page.title",
                "thank_you.title",
                "design.btn_color",
            ]
        );
    }
}
