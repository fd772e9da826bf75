/*
 * Responsibility
 * - Movies の request/response DTO
 * - release_date は JSON 文字列のみ受け付け、中身の検証は ReleaseDatePolicy に委ねる
 */
use serde::{Deserialize, Serialize};

use crate::repos::{MovieChanges, MovieRow, NewMovie};
use crate::services::release_date::ReleaseDatePolicy;

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub release_date: String,
}

impl CreateMovieRequest {
    pub fn validate(&self, release_dates: &ReleaseDatePolicy) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        release_dates.validate(&self.release_date)
    }
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(req: CreateMovieRequest) -> Self {
        Self {
            title: req.title,
            release_date: req.release_date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub release_date: Option<String>,
}

impl UpdateMovieRequest {
    pub fn validate(&self, release_dates: &ReleaseDatePolicy) -> Result<(), String> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty".to_string());
        }
        if let Some(release_date) = &self.release_date {
            release_dates.validate(release_date)?;
        }

        Ok(())
    }
}

impl From<UpdateMovieRequest> for MovieChanges {
    fn from(req: UpdateMovieRequest) -> Self {
        Self {
            title: req.title,
            release_date: req.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub release_date: String,
}

impl From<MovieRow> for MovieResponse {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub success: bool,
    pub movies: Vec<MovieResponse>,
}
