//! Durable shape of a space, as stored behind the persistence gateway.
//!
//! Field names follow the storage schema rather than the draft. Every
//! detail column is optional at this boundary: a space can be created
//! before it is configured, and older rows may predate newer columns.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A persisted space together with its (optional) configuration details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceRecord {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub slug: String,
    /// `None` when the space exists but was never configured.
    pub details: Option<SpaceDetails>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Configuration columns of a space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceDetails {
    pub cover_page_title: Option<String>,
    pub cover_page_description: Option<String>,
    pub cover_page_image_url: Option<String>,
    pub cover_page_btn_text: Option<String>,
    pub user_photo: Option<bool>,
    pub user_first_name: Option<bool>,
    pub user_last_name: Option<bool>,
    pub user_email: Option<bool>,
    pub user_job_title: Option<bool>,
    pub user_company: Option<bool>,
    pub testimonial_text_type: Option<bool>,
    pub testimonial_video_type: Option<bool>,
    pub testimonial_page_title: Option<String>,
    pub testimonial_page_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub question_header: Option<String>,
    pub questions: Option<Vec<String>>,
    pub thankyou_title: Option<String>,
    pub thankyou_message: Option<String>,
    pub theme: Option<i32>,
    pub btn_color: Option<String>,
}

/// Identity returned by a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSpace {
    pub id: DbId,
    pub slug: String,
}
