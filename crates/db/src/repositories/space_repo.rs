//! Repository for the `spaces` and `space_details` tables.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use viewus_core::reconcile::apply_section;
use viewus_core::space_draft::{Section, SectionValue};
use viewus_core::space_record::{SpaceDetails, SpaceRecord};
use viewus_core::types::DbId;

use crate::models::space::{Space, SpaceDetailsRow};

/// Column list for `spaces` queries.
const COLUMNS: &str = "id, owner_id, name, slug, created_at, updated_at";

/// Column list for `space_details` queries.
const DETAIL_COLUMNS: &str = "space_id, cover_page_title, cover_page_description, \
     cover_page_image_url, cover_page_btn_text, user_photo, user_first_name, user_last_name, \
     user_email, user_job_title, user_company, testimonial_text_type, testimonial_video_type, \
     testimonial_page_title, testimonial_page_description, tags, question_header, questions, \
     thankyou_title, thankyou_message, theme, btn_color, created_at, updated_at";

type DetailsQuery<'q> = QueryAs<'q, Postgres, SpaceDetailsRow, PgArguments>;

/// Detail columns owned by one section, in bind order.
fn section_columns(section: Section) -> &'static [&'static str] {
    match section {
        Section::ProjectDetails => &[],
        Section::CoverPage => &[
            "cover_page_title",
            "cover_page_description",
            "cover_page_image_url",
            "cover_page_btn_text",
        ],
        Section::UserInformation => &[
            "user_photo",
            "user_first_name",
            "user_last_name",
            "user_email",
            "user_job_title",
            "user_company",
        ],
        Section::TestimonialType => &["testimonial_text_type", "testimonial_video_type"],
        Section::TestimonialPage => &[
            "testimonial_page_title",
            "testimonial_page_description",
            "tags",
            "question_header",
            "questions",
        ],
        Section::ThankYou => &["thankyou_title", "thankyou_message"],
        Section::Design => &["theme", "btn_color"],
    }
}

/// Bind one section's columns in [`section_columns`] order.
fn bind_section<'q>(
    query: DetailsQuery<'q>,
    d: &'q SpaceDetails,
    section: Section,
) -> DetailsQuery<'q> {
    match section {
        Section::ProjectDetails => query,
        Section::CoverPage => query
            .bind(&d.cover_page_title)
            .bind(&d.cover_page_description)
            .bind(&d.cover_page_image_url)
            .bind(&d.cover_page_btn_text),
        Section::UserInformation => query
            .bind(d.user_photo)
            .bind(d.user_first_name)
            .bind(d.user_last_name)
            .bind(d.user_email)
            .bind(d.user_job_title)
            .bind(d.user_company),
        Section::TestimonialType => query
            .bind(d.testimonial_text_type)
            .bind(d.testimonial_video_type),
        Section::TestimonialPage => query
            .bind(&d.testimonial_page_title)
            .bind(&d.testimonial_page_description)
            .bind(&d.tags)
            .bind(&d.question_header)
            .bind(&d.questions),
        Section::ThankYou => query.bind(&d.thankyou_title).bind(&d.thankyou_message),
        Section::Design => query.bind(d.theme).bind(&d.btn_color),
    }
}

/// `INSERT ... ON CONFLICT (space_id) DO UPDATE` touching only `columns`.
fn upsert_details_sql(columns: &[&str]) -> String {
    let mut insert_cols = String::from("space_id");
    let mut values = String::from("$1");
    let mut updates = String::new();
    for (idx, col) in columns.iter().enumerate() {
        insert_cols.push_str(", ");
        insert_cols.push_str(col);
        values.push_str(&format!(", ${}", idx + 2));
        updates.push_str(&format!("{col} = EXCLUDED.{col}, "));
    }
    format!(
        "INSERT INTO space_details ({insert_cols}) VALUES ({values}) \
         ON CONFLICT (space_id) DO UPDATE SET {updates}updated_at = now() \
         RETURNING {DETAIL_COLUMNS}"
    )
}

/// Provides persistence for spaces and their configuration details.
pub struct SpaceRepo;

impl SpaceRepo {
    /// Insert a space and its full details row in one transaction.
    ///
    /// Fails with a unique violation on `uq_spaces_slug` when the slug is
    /// taken; nothing is written in that case.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        name: &str,
        slug: &str,
        details: &SpaceDetails,
    ) -> Result<Space, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO spaces (owner_id, name, slug) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let space = sqlx::query_as::<_, Space>(&query)
            .bind(owner_id)
            .bind(name)
            .bind(slug)
            .fetch_one(&mut *tx)
            .await?;

        let detail_sections = &Section::ALL[1..];
        let columns: Vec<&str> = detail_sections
            .iter()
            .flat_map(|s| section_columns(*s).iter().copied())
            .collect();
        let details_sql = upsert_details_sql(&columns);
        let mut insert = sqlx::query_as::<_, SpaceDetailsRow>(&details_sql).bind(space.id);
        for section in detail_sections {
            insert = bind_section(insert, details, *section);
        }
        insert.fetch_one(&mut *tx).await?;

        tx.commit().await?;
        Ok(space)
    }

    /// Find a space by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE id = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a space by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE slug = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Details row of a space, if any section was ever saved.
    pub async fn find_details(
        pool: &PgPool,
        space_id: DbId,
    ) -> Result<Option<SpaceDetailsRow>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} FROM space_details WHERE space_id = $1");
        sqlx::query_as::<_, SpaceDetailsRow>(&query)
            .bind(space_id)
            .fetch_optional(pool)
            .await
    }

    /// Load a space with its details.
    pub async fn find_record_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SpaceRecord>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(space) => Self::with_details(pool, space).await.map(Some),
            None => Ok(None),
        }
    }

    /// Load a space with its details by slug.
    pub async fn find_record_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<SpaceRecord>, sqlx::Error> {
        match Self::find_by_slug(pool, slug).await? {
            Some(space) => Self::with_details(pool, space).await.map(Some),
            None => Ok(None),
        }
    }

    async fn with_details(pool: &PgPool, space: Space) -> Result<SpaceRecord, sqlx::Error> {
        let details = Self::find_details(pool, space.id).await?;
        Ok(space.into_record(details))
    }

    /// List an owner's spaces, most recently created first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Space>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM spaces \
             WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count an owner's spaces.
    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM spaces WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Whether any space already uses `slug`.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM spaces WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Write one section's detail columns, creating the details row if it
    /// does not exist yet. Columns of other sections keep their values.
    ///
    /// Returns `None` if the space does not exist.
    pub async fn upsert_section(
        pool: &PgPool,
        space_id: DbId,
        value: &SectionValue,
    ) -> Result<Option<SpaceDetailsRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let touched: Option<(DbId,)> =
            sqlx::query_as("UPDATE spaces SET updated_at = now() WHERE id = $1 RETURNING id")
                .bind(space_id)
                .fetch_optional(&mut *tx)
                .await?;
        if touched.is_none() {
            return Ok(None);
        }

        let section = value.section();
        let mut details = SpaceDetails::default();
        apply_section(&mut details, value);

        let query = upsert_details_sql(section_columns(section));
        let row = bind_section(
            sqlx::query_as::<_, SpaceDetailsRow>(&query).bind(space_id),
            &details,
            section,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Delete a space; its details cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
