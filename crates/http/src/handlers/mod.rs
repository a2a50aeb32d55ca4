pub mod admin;
pub mod collection;
pub mod media;
pub mod observations;
