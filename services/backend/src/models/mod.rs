pub mod rating;
pub mod song;
