use serde::Serialize;

use crate::entities::movie;

pub const MIN_RELEASE_YEAR: i32 = 1800;
/// How far past the current year a release may be scheduled.
pub const RELEASE_YEAR_HEADROOM: i32 = 5;

/// Wire shape of a movie record.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub trailer_url: String,
    pub genre: String,
    pub release_year: Option<i32>,
    pub director: String,
    pub cast: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            poster_url: m.poster_url,
            trailer_url: m.trailer_url,
            genre: m.genre,
            release_year: m.release_year,
            director: m.director,
            cast: serde_json::from_str(&m.cast_list).unwrap_or_default(),
            created_at: fmt_timestamp(m.created_at),
            updated_at: fmt_timestamp(m.updated_at),
        }
    }
}

/// Submitted movie fields before the store fills in defaults and timestamps.
#[derive(Clone, Debug, Default)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
    pub trailer_url: String,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub cast: Vec<String>,
}

/// Split a comma-separated cast string into trimmed names.
pub fn parse_cast(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn current_year() -> i32 {
    let today: jiff::civil::Date = jiff::Zoned::now().into();
    i32::from(today.year())
}

pub fn release_year_in_range(year: i32, current_year: i32) -> bool {
    (MIN_RELEASE_YEAR..=current_year + RELEASE_YEAR_HEADROOM).contains(&year)
}

fn fmt_timestamp(seconds: i64) -> String {
    jiff::Timestamp::from_second(seconds)
        .map(|t| t.to_string())
        .unwrap_or_default()
}
