//! Pipeline stages, from raw bytes to the text report.
pub mod container;
pub mod error;
pub mod fields;
pub mod geocode;
pub mod normalize;
pub mod rational;
pub mod report;
pub mod tag_table;
