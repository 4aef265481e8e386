//! Taxonomy curation support: cleaning source occupation titles and importing them.

pub mod clean;
pub mod import;
