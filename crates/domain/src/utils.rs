//! Pure utility functions with no infrastructure dependencies

pub mod localization;
