//! Senda - Guided self-help assessment and path recommendation
//!
//! This crate scores a Likert questionnaire over psychological dimensions,
//! interprets the resulting profile, recommends multi-week content paths,
//! and runs the reflection exercises inside those paths.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
