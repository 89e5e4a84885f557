//! Movie domain model.
//!
//! The movie metadata provider owns the schema; this module only consumes the
//! subset the browser displays. Unknown fields in provider payloads are ignored.

use serde::{Deserialize, Serialize};

/// A movie as returned by the metadata provider.
///
/// Only `id` and `title` are guaranteed. Everything else is optional because
/// the provider omits or nulls fields freely (unreleased titles have no
/// `release_date`, many obscure titles have no poster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Movie {
    /// Creates a movie with only an id and a title set.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            vote_average: None,
            original_language: None,
            release_date: None,
        }
    }

    /// Returns the rating formatted with one decimal, or `N/A`.
    ///
    /// A rating of exactly zero means "no votes yet" on the provider side and
    /// is shown as `N/A` as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::Movie;
    ///
    /// let mut movie = Movie::new(1, "Dune");
    /// assert_eq!(movie.rating_label(), "N/A");
    /// movie.vote_average = Some(7.84);
    /// assert_eq!(movie.rating_label(), "7.8");
    /// ```
    #[must_use]
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(rating) if rating > 0.0 => format!("{rating:.1}"),
            _ => "N/A".to_string(),
        }
    }

    /// Returns the release year parsed from `release_date`, or `N/A`.
    #[must_use]
    pub fn year_label(&self) -> String {
        use chrono::Datelike;

        self.release_date
            .as_deref()
            .and_then(|date| chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map_or_else(|| "N/A".to_string(), |date| date.year().to_string())
    }

    /// Returns the upper-cased original language code, or `N/A`.
    #[must_use]
    pub fn language_label(&self) -> String {
        self.original_language
            .as_deref()
            .filter(|lang| !lang.trim().is_empty())
            .map_or_else(|| "N/A".to_string(), str::to_uppercase)
    }
}

/// Joins the image CDN base with a provider poster path.
///
/// Slashes at the seam are collapsed so both `"/abc.jpg"` and `"abc.jpg"` work.
/// A missing or blank poster path yields an empty string, which is what the
/// trending store persists for poster-less movies.
///
/// # Examples
///
/// ```
/// use marquee::domain::movie::poster_url;
///
/// assert_eq!(
///     poster_url("https://image.tmdb.org/t/p/w500/", Some("/abc.jpg")),
///     "https://image.tmdb.org/t/p/w500/abc.jpg"
/// );
/// assert_eq!(poster_url("https://image.tmdb.org/t/p/w500", None), "");
/// ```
#[must_use]
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> String {
    match poster_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => format!(
            "{}/{}",
            image_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => String::new(),
    }
}
