//! Job title resolution: taxonomy lookup, heuristic normalization, approval check,
//! unverified-title recording and the scoring composer that ties them together.

pub mod like;
pub mod matcher;
#[cfg(test)]
pub mod memory;
pub mod normalizer;
pub mod postgres;
pub mod recorder;
pub mod repository;
