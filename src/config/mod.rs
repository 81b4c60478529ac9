//! Configuration and path management for fintrack-core

pub mod paths;

pub use paths::FintrackPaths;
