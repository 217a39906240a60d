use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::{
    entities::movie,
    error::{ApiError, ApiResult},
    models::{self, Movie, MovieDraft},
};

/// Persistence layer for movie records. Movies are inserted once and never
/// mutated or deleted.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies in insertion order.
    pub async fn list(&self) -> ApiResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> ApiResult<Option<Movie>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?.map(Movie::from))
    }

    /// Insert a new movie with the server-assigned poster URL. Enforces the
    /// required fields, the release-year range, and the unique-title
    /// constraint.
    pub async fn insert(&self, draft: MovieDraft, poster_url: String) -> ApiResult<Movie> {
        let title = draft.title.trim().to_string();
        let description = draft.description.trim().to_string();
        let trailer_url = draft.trailer_url.trim().to_string();

        if title.is_empty() {
            return Err(ApiError::Validation("title is required".to_string()));
        }
        if description.is_empty() {
            return Err(ApiError::Validation("description is required".to_string()));
        }
        if trailer_url.is_empty() {
            return Err(ApiError::Validation("trailerUrl is required".to_string()));
        }

        if let Some(year) = draft.release_year {
            let current = models::current_year();
            if !models::release_year_in_range(year, current) {
                return Err(ApiError::Validation(format!(
                    "releaseYear must be between {} and {}",
                    models::MIN_RELEASE_YEAR,
                    current + models::RELEASE_YEAR_HEADROOM
                )));
            }
        }

        let now = now_sec();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(title),
            description: Set(description),
            poster_url: Set(poster_url),
            trailer_url: Set(trailer_url),
            genre: Set(non_empty_or(draft.genre, "Unspecified")),
            release_year: Set(draft.release_year),
            director: Set(non_empty_or(draft.director, "Unknown")),
            cast_list: Set(serde_json::to_string(&draft.cast)
                .unwrap_or_else(|_| "[]".to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await.map_err(|err| {
            if is_duplicate_title(&err) {
                ApiError::Validation("A movie with this title already exists.".to_string())
            } else {
                err.into()
            }
        })?;

        Ok(created.into())
    }
}

fn is_duplicate_title(err: &sea_orm::DbErr) -> bool {
    err.to_string().contains("UNIQUE constraint failed: movies.title")
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
