use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Html,
};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{self, Movie, MovieDraft},
    templates,
};

/// Multipart field name the admin form uses for the poster file.
pub const POSTER_FIELD: &str = "posterImage";
pub const MAX_POSTER_BYTES: usize = 10 * 1000 * 1000;

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];
const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

pub async fn catalog() -> Html<String> {
    Html(templates::app_page(templates::View::Catalog))
}

pub async fn admin() -> Html<String> {
    Html(templates::app_page(templates::View::Admin))
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Movie>>> {
    Ok(Json(state.store.list().await?))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Movie>> {
    let id: i32 = raw_id
        .parse()
        .map_err(|_| ApiError::Internal(anyhow::anyhow!("malformed movie id: {raw_id}")))?;

    match state.store.get(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(ApiError::NotFound("Movie not found".to_string())),
    }
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let submission = read_submission(multipart).await?;

    let Some(poster) = submission.poster else {
        return Err(ApiError::Validation("No poster image file provided.".to_string()));
    };
    check_poster(&poster)?;

    // Upload first, then insert. A failed insert leaves the uploaded image
    // behind; callers must tolerate stray remote assets.
    let poster_url = state.media.upload_image(poster.bytes, &poster.content_type).await?;
    let movie = state.store.insert(submission.draft, poster_url).await?;

    tracing::debug!(id = movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

struct PosterUpload {
    bytes: Vec<u8>,
    file_name: String,
    content_type: String,
}

struct Submission {
    draft: MovieDraft,
    poster: Option<PosterUpload>,
}

async fn read_submission(mut multipart: Multipart) -> ApiResult<Submission> {
    let mut draft = MovieDraft::default();
    let mut poster = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Validation(format!("invalid multipart data: {err}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == POSTER_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|err| {
                ApiError::Validation(format!("failed to read poster image: {err}"))
            })?;
            poster = Some(PosterUpload { bytes: bytes.to_vec(), file_name, content_type });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| ApiError::Validation(format!("failed to read field {name}: {err}")))?;

        match name.as_str() {
            "title" => draft.title = value,
            "description" => draft.description = value,
            "trailerUrl" => draft.trailer_url = value,
            "genre" => draft.genre = Some(value),
            "releaseYear" => draft.release_year = parse_release_year(&value)?,
            "director" => draft.director = Some(value),
            "cast" => draft.cast = models::parse_cast(&value),
            _ => {}
        }
    }

    Ok(Submission { draft, poster })
}

fn parse_release_year(raw: &str) -> ApiResult<Option<i32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ApiError::Validation(format!("releaseYear must be a number, got {raw:?}")))
}

/// MIME type and filename extension are both checked against the image
/// allow-list, and the file must fit under the size limit, before any upload
/// or insert happens.
fn check_poster(poster: &PosterUpload) -> ApiResult<()> {
    let extension = poster
        .file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if !ALLOWED_IMAGE_TYPES.contains(&poster.content_type.as_str())
        || !ALLOWED_EXTENSIONS.contains(&extension.as_str())
    {
        return Err(ApiError::Validation("Images only (jpeg, png, gif).".to_string()));
    }

    if poster.bytes.len() > MAX_POSTER_BYTES {
        return Err(ApiError::Validation("Poster image exceeds the 10 MB limit.".to_string()));
    }

    Ok(())
}
