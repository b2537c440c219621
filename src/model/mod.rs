pub mod company;
pub mod config;
pub mod metric;
pub mod modes;
pub mod points;
pub mod selection;
pub mod stats;
