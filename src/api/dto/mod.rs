pub mod actors;
pub mod envelope;
pub mod movies;
