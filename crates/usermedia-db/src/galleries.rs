use chrono::Utc;
use sqlx::{PgPool, Postgres};
use usermedia_core::models::Gallery;
use usermedia_core::AppError;
use uuid::Uuid;

use crate::traits::GalleryRepository;
use async_trait::async_trait;

/// Postgres-backed gallery repository
#[derive(Clone)]
pub struct PgGalleryRepository {
    pool: PgPool,
}

impl PgGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryRepository for PgGalleryRepository {
    #[tracing::instrument(skip(self), fields(db.table = "galleries", db.operation = "insert", db.record_id = %id))]
    async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: String,
        editor_ids: Vec<Uuid>,
    ) -> Result<Gallery, AppError> {
        let now = Utc::now();

        let row: Gallery = sqlx::query_as::<Postgres, Gallery>(
            r#"
            INSERT INTO galleries (id, user_id, title, editor_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&title)
        .bind(&editor_ids)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "galleries", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Gallery>, AppError> {
        let row: Option<Gallery> =
            sqlx::query_as::<Postgres, Gallery>("SELECT * FROM galleries WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "galleries", db.operation = "update", db.record_id = %id))]
    async fn set_logo(
        &self,
        id: Uuid,
        image_id: Option<Uuid>,
    ) -> Result<Option<Gallery>, AppError> {
        let row: Option<Gallery> = sqlx::query_as::<Postgres, Gallery>(
            r#"
            UPDATE galleries
            SET logo_image_id = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(image_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
