pub mod config;
pub mod episode;
pub mod error;
pub mod ids;
pub mod inference;
pub mod model;
pub mod oracle;
pub mod schedule;
pub mod scoring;
pub mod space;
pub mod tiebreak;

#[cfg(test)]
mod tests;
