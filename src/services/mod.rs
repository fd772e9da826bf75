pub mod auth;
pub mod release_date;
