/*
 * Responsibility
 * - 成功レスポンスの共通エンベロープ ({success: true, <key>: ...})
 * - 失敗側は error::ErrorResponse
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub success: bool,
    pub created: T,
}

impl<T> Created<T> {
    pub fn new(created: T) -> Self {
        Self {
            success: true,
            created,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Updated<T> {
    pub success: bool,
    pub updates: T,
}

impl<T> Updated<T> {
    pub fn new(updates: T) -> Self {
        Self {
            success: true,
            updates,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Deleted<T> {
    pub success: bool,
    pub deleted: T,
}

impl<T> Deleted<T> {
    pub fn new(deleted: T) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}
