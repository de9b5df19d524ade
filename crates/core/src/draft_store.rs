//! Session-scoped store for the in-progress space configuration.
//!
//! The store is constructed explicitly for one wizard session and handed to
//! the steps and the controller by reference; there is no shared global
//! instance. Each section is replaced atomically through its setter, and
//! every replacement bumps that section's revision so that late gateway
//! responses can be recognised as stale.

use crate::space_draft::{
    CoverPage, Design, ProjectDetails, Section, SectionValue, SpaceDraft, TestimonialPage,
    TestimonialType, ThankYou, UserInformation,
};
use crate::space_palette;

/// Monotonic per-section edit counter.
pub type Revision = u64;

/// Holds one [`SpaceDraft`] for the lifetime of a wizard session.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    draft: SpaceDraft,
    revisions: [Revision; 7],
}

impl DraftStore {
    /// Create a store holding empty defaults.
    pub fn create() -> Self {
        Self::default()
    }

    /// Reset every section to its empty default and clear revisions.
    ///
    /// Overwrites rather than merges, so calling it again after a previous
    /// session's edits leaves nothing behind.
    pub fn initialize_space_data(&mut self) {
        self.draft = SpaceDraft::default();
        self.revisions = [0; 7];
    }

    /// End the session, discarding the draft.
    pub fn dispose(self) {
        tracing::debug!(
            slug = %self.draft.project_details.project_slug,
            "Draft store disposed"
        );
    }

    /// Copy of the whole draft.
    pub fn snapshot(&self) -> SpaceDraft {
        self.draft.clone()
    }

    /// Current revision of a section. Zero until the section is first set.
    pub fn revision(&self, section: Section) -> Revision {
        self.revisions[section.index()]
    }

    fn bump(&mut self, section: Section) {
        self.revisions[section.index()] += 1;
    }

    // -- generic access --

    pub fn get(&self, section: Section) -> SectionValue {
        self.draft.section(section)
    }

    /// Replace the section carried by `value`.
    pub fn set(&mut self, value: SectionValue) {
        let section = value.section();
        self.draft.replace(value);
        self.bump(section);
    }

    // -- project details --

    pub fn project_details(&self) -> &ProjectDetails {
        &self.draft.project_details
    }

    pub fn set_project_details(&mut self, value: ProjectDetails) {
        self.set(SectionValue::ProjectDetails(value));
    }

    // -- cover page --

    pub fn cover_page(&self) -> &CoverPage {
        &self.draft.cover_page
    }

    pub fn set_cover_page(&mut self, value: CoverPage) {
        self.set(SectionValue::CoverPage(value));
    }

    // -- user information --

    pub fn user_information(&self) -> &UserInformation {
        &self.draft.user_information
    }

    pub fn set_user_information(&mut self, value: UserInformation) {
        self.set(SectionValue::UserInformation(value));
    }

    // -- testimonial type --

    pub fn testimonial_type(&self) -> &TestimonialType {
        &self.draft.testimonial_type
    }

    pub fn set_testimonial_type(&mut self, value: TestimonialType) {
        self.set(SectionValue::TestimonialType(value));
    }

    // -- testimonial page --

    pub fn testimonial_page(&self) -> &TestimonialPage {
        &self.draft.testimonial_page
    }

    pub fn set_testimonial_page(&mut self, value: TestimonialPage) {
        self.set(SectionValue::TestimonialPage(value));
    }

    // -- thank you --

    pub fn thank_you(&self) -> &ThankYou {
        &self.draft.thank_you
    }

    pub fn set_thank_you(&mut self, value: ThankYou) {
        self.set(SectionValue::ThankYou(value));
    }

    // -- design --

    pub fn design(&self) -> &Design {
        &self.draft.design
    }

    pub fn set_design(&mut self, value: Design) {
        self.set(SectionValue::Design(value));
    }

    /// Optimistically apply a swatch or picker colour.
    ///
    /// Returns `false` and keeps the previous colour if `color` is not a
    /// valid hex colour.
    pub fn set_btn_color(&mut self, color: &str) -> bool {
        if !space_palette::is_valid_hex_color(color) {
            return false;
        }
        let design = Design {
            btn_color: color.to_string(),
            ..self.draft.design.clone()
        };
        self.set_design(design);
        true
    }

    /// Optimistically apply a gradient choice; unknown ids clamp to the
    /// default gradient.
    pub fn set_gradient(&mut self, gradient_type: Option<i32>) {
        let design = Design {
            gradient_type: space_palette::clamp_gradient(gradient_type),
            ..self.draft.design.clone()
        };
        self.set_design(design);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space_palette::{DEFAULT_BUTTON_COLOR, DEFAULT_GRADIENT_ID};

    fn edited_store() -> DraftStore {
        let mut store = DraftStore::create();
        store.set_project_details(ProjectDetails {
            project_name: "Acme".into(),
            project_slug: "acme".into(),
        });
        store.set_thank_you(ThankYou {
            title: "Thanks".into(),
            description: "We appreciate it".into(),
        });
        store.set_btn_color("#000000");
        store
    }

    #[test]
    fn initialize_twice_yields_identical_defaults() {
        let mut store = edited_store();
        store.initialize_space_data();
        let first = store.snapshot();
        store.initialize_space_data();
        let second = store.snapshot();
        assert_eq!(first, second);
        assert_eq!(first, SpaceDraft::default());
    }

    #[test]
    fn initialize_discards_previous_session_state() {
        let mut store = edited_store();
        store.initialize_space_data();
        assert_eq!(store.project_details(), &ProjectDetails::default());
        assert_eq!(store.thank_you(), &ThankYou::default());
        assert_eq!(store.design().btn_color, DEFAULT_BUTTON_COLOR);
        for section in Section::ALL {
            assert_eq!(store.revision(section), 0);
        }
    }

    #[test]
    fn valid_btn_color_round_trips() {
        let mut store = DraftStore::create();
        for color in ["#000000", "#abc", "#71D4FF", "#FfFfFf"] {
            assert!(store.set_btn_color(color));
            assert_eq!(store.design().btn_color, color);
        }
    }

    #[test]
    fn invalid_btn_color_keeps_previous_value() {
        let mut store = DraftStore::create();
        assert!(store.set_btn_color("#123456"));
        let revision = store.revision(Section::Design);
        for bad in ["123456", "#12345", "#ZZZZZZ", "", "#1234567"] {
            assert!(!store.set_btn_color(bad));
            assert_eq!(store.design().btn_color, "#123456");
        }
        assert_eq!(store.revision(Section::Design), revision);
    }

    #[test]
    fn gradient_clamps_to_default() {
        let mut store = DraftStore::create();
        store.set_gradient(Some(3));
        assert_eq!(store.design().gradient_type, 3);
        store.set_gradient(None);
        assert_eq!(store.design().gradient_type, DEFAULT_GRADIENT_ID);
        store.set_gradient(Some(99));
        assert_eq!(store.design().gradient_type, DEFAULT_GRADIENT_ID);
    }

    #[test]
    fn setters_bump_only_their_section_revision() {
        let mut store = DraftStore::create();
        store.set_cover_page(CoverPage::default());
        store.set_cover_page(CoverPage::default());
        assert_eq!(store.revision(Section::CoverPage), 2);
        assert_eq!(store.revision(Section::Design), 0);
        assert_eq!(store.revision(Section::ThankYou), 0);
    }

    #[test]
    fn generic_set_and_get_agree_with_typed_accessors() {
        let mut store = DraftStore::create();
        let flags = UserInformation {
            email: true,
            ..UserInformation::default()
        };
        store.set(SectionValue::UserInformation(flags));
        assert_eq!(store.user_information(), &flags);
        assert_eq!(
            store.get(Section::UserInformation),
            SectionValue::UserInformation(flags)
        );
    }

    #[test]
    fn dispose_consumes_the_store() {
        let store = edited_store();
        store.dispose();
    }
}
