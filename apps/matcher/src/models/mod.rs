pub mod resume;
pub mod title;
