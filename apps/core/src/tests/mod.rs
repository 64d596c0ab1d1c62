//! Test Module
//!
//! Cross-module test suite for the gap analysis engine. Unit tests live
//! next to their modules; these files exercise whole pipelines.
//!
//! ## Test Categories
//! - `analysis_tests`: HTML fixtures through extraction, comparison,
//!   scoring and prioritization
//! - `report_tests`: report JSON contract and round-tripping

pub mod analysis_tests;
