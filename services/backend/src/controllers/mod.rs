pub mod rating;
pub mod root;
pub mod song;
pub use rating::RatingController;
pub use root::RootController;
pub use song::SongController;
