use chrono::Utc;
use sqlx::{PgPool, Postgres};
use usermedia_core::models::UserMediaImage;
use usermedia_core::AppError;
use uuid::Uuid;

use crate::traits::{ImageListFilter, ImageRepository};
use async_trait::async_trait;

/// Postgres-backed image repository
#[derive(Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "insert", db.record_id = %id))]
    async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        content_type: Option<String>,
        object_id: Option<Uuid>,
        image_path: String,
        original_filename: String,
        file_size: i64,
        thumbnail_paths: Vec<String>,
    ) -> Result<UserMediaImage, AppError> {
        let now = Utc::now();

        let row: UserMediaImage = sqlx::query_as::<Postgres, UserMediaImage>(
            r#"
            INSERT INTO user_media_images (
                id, user_id, content_type, object_id,
                image_path, original_filename, file_size,
                thumbnail_paths, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&content_type)
        .bind(object_id)
        .bind(&image_path)
        .bind(&original_filename)
        .bind(file_size)
        .bind(&thumbnail_paths)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<UserMediaImage>, AppError> {
        let row: Option<UserMediaImage> = sqlx::query_as::<Postgres, UserMediaImage>(
            "SELECT * FROM user_media_images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "select", db.record_id = %id))]
    async fn get_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<UserMediaImage>, AppError> {
        let row: Option<UserMediaImage> = sqlx::query_as::<Postgres, UserMediaImage>(
            "SELECT * FROM user_media_images WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "select"))]
    async fn count_for_owner(
        &self,
        user_id: Uuid,
        content_type: &str,
        object_id: Uuid,
    ) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_media_images WHERE user_id = $1 AND content_type = $2 AND object_id = $3",
        )
        .bind(user_id)
        .bind(content_type)
        .bind(object_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "select"))]
    async fn list(
        &self,
        filter: ImageListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserMediaImage>, AppError> {
        let rows: Vec<UserMediaImage> = match (filter.user_id, filter.content_type) {
            (None, None) => {
                sqlx::query_as::<Postgres, UserMediaImage>(
                    "SELECT * FROM user_media_images ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(user_id), None) => {
                sqlx::query_as::<Postgres, UserMediaImage>(
                    "SELECT * FROM user_media_images WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(user_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(content_type)) => {
                sqlx::query_as::<Postgres, UserMediaImage>(
                    "SELECT * FROM user_media_images WHERE content_type = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(content_type)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(user_id), Some(content_type)) => {
                sqlx::query_as::<Postgres, UserMediaImage>(
                    "SELECT * FROM user_media_images WHERE user_id = $1 AND content_type = $2 ORDER BY created_at DESC LIMIT $3 OFFSET $4",
                )
                .bind(user_id)
                .bind(content_type)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "update", db.record_id = %id))]
    async fn update_file(
        &self,
        id: Uuid,
        image_path: String,
        original_filename: String,
        file_size: i64,
        thumbnail_paths: Vec<String>,
    ) -> Result<Option<UserMediaImage>, AppError> {
        let row: Option<UserMediaImage> = sqlx::query_as::<Postgres, UserMediaImage>(
            r#"
            UPDATE user_media_images
            SET image_path = $2,
                original_filename = $3,
                file_size = $4,
                thumbnail_paths = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&image_path)
        .bind(&original_filename)
        .bind(file_size)
        .bind(&thumbnail_paths)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "update", db.record_id = %id))]
    async fn update_crop(
        &self,
        id: Uuid,
        x: i32,
        y: i32,
        x2: i32,
        y2: i32,
        w: i32,
        h: i32,
    ) -> Result<Option<UserMediaImage>, AppError> {
        let row: Option<UserMediaImage> = sqlx::query_as::<Postgres, UserMediaImage>(
            r#"
            UPDATE user_media_images
            SET thumb_x = $2,
                thumb_y = $3,
                thumb_x2 = $4,
                thumb_y2 = $5,
                thumb_w = $6,
                thumb_h = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(x)
        .bind(y)
        .bind(x2)
        .bind(y2)
        .bind(w)
        .bind(h)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, paths), fields(db.table = "user_media_images", db.operation = "update", db.record_id = %id))]
    async fn add_thumbnail_paths(
        &self,
        id: Uuid,
        paths: &[String],
    ) -> Result<Option<UserMediaImage>, AppError> {
        let row: Option<UserMediaImage> = sqlx::query_as::<Postgres, UserMediaImage>(
            r#"
            UPDATE user_media_images
            SET thumbnail_paths = (
                    SELECT COALESCE(array_agg(DISTINCT p), '{}')
                    FROM unnest(thumbnail_paths || $2::text[]) AS p
                ),
                updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(paths)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<Option<UserMediaImage>, AppError> {
        let row: Option<UserMediaImage> = sqlx::query_as::<Postgres, UserMediaImage>(
            "DELETE FROM user_media_images WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "user_media_images", db.operation = "delete"))]
    async fn delete_for_owner(
        &self,
        user_id: Uuid,
        content_type: &str,
        object_id: Uuid,
    ) -> Result<Vec<UserMediaImage>, AppError> {
        let rows: Vec<UserMediaImage> = sqlx::query_as::<Postgres, UserMediaImage>(
            "DELETE FROM user_media_images WHERE user_id = $1 AND content_type = $2 AND object_id = $3 RETURNING *",
        )
        .bind(user_id)
        .bind(content_type)
        .bind(object_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
