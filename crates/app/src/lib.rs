//! Persistence and domain services for the Souq discount engine.

pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
