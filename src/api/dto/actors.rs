/*
 * Responsibility
 * - Actors の request/response DTO
 * - validate() で形式チェック (型チェックは serde が担当)
 */
use serde::{Deserialize, Serialize};

use crate::repos::{ActorChanges, ActorRow, NewActor};

const MAX_AGE: i32 = 150;

fn check_age(age: i32) -> Result<(), &'static str> {
    if !(0..=MAX_AGE).contains(&age) {
        return Err("age must be between 0 and 150");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl CreateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        check_age(self.age)?;
        if self.gender.trim().is_empty() {
            return Err("gender is required");
        }

        Ok(())
    }
}

impl From<CreateActorRequest> for NewActor {
    fn from(req: CreateActorRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
        }
    }
}

// Absent (or null) fields keep the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateActorRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl UpdateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(age) = self.age {
            check_age(age)?;
        }
        if let Some(gender) = &self.gender
            && gender.trim().is_empty()
        {
            return Err("gender cannot be empty");
        }

        Ok(())
    }
}

impl From<UpdateActorRequest> for ActorChanges {
    fn from(req: UpdateActorRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl From<ActorRow> for ActorResponse {
    fn from(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorListResponse {
    pub success: bool,
    pub actors: Vec<ActorResponse>,
}
