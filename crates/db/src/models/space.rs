//! Space and space-detail rows.

use serde::Serialize;
use sqlx::FromRow;
use viewus_core::space_record::{SpaceDetails, SpaceRecord};
use viewus_core::types::{DbId, Timestamp};

/// A row from the `spaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Space {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Space {
    /// Combine with the (possibly missing) details row.
    pub fn into_record(self, details: Option<SpaceDetailsRow>) -> SpaceRecord {
        SpaceRecord {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            slug: self.slug,
            details: details.map(SpaceDetails::from),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A row from the `space_details` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpaceDetailsRow {
    pub space_id: DbId,
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SpaceDetailsRow> for SpaceDetails {
    fn from(row: SpaceDetailsRow) -> Self {
        Self {
            cover_page_title: row.cover_page_title,
            cover_page_description: row.cover_page_description,
            cover_page_image_url: row.cover_page_image_url,
            cover_page_btn_text: row.cover_page_btn_text,
            user_photo: row.user_photo,
            user_first_name: row.user_first_name,
            user_last_name: row.user_last_name,
            user_email: row.user_email,
            user_job_title: row.user_job_title,
            user_company: row.user_company,
            testimonial_text_type: row.testimonial_text_type,
            testimonial_video_type: row.testimonial_video_type,
            testimonial_page_title: row.testimonial_page_title,
            testimonial_page_description: row.testimonial_page_description,
            tags: row.tags,
            question_header: row.question_header,
            questions: row.questions,
            thankyou_title: row.thankyou_title,
            thankyou_message: row.thankyou_message,
            theme: row.theme,
            btn_color: row.btn_color,
        }
    }
}
