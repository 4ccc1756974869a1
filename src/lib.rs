pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod startup;

pub use extractor::{EventDetailExtractor, EventDetails, Strategy};
