//! Test Module
//!
//! Scenario suites for the fintent core.
//!
//! ## Test Categories
//! - `analysis_tests`: extraction properties over many inputs, insight derivation
//! - `store_tests`: store operations, failure semantics and the loading flag
//! - `speech_tests`: recording sessions and file transcription
//! - `views_tests`: dashboard, insights and communication aggregates
//! - `chaos_test`: concurrent appends and failing backends
//! - `integration_tests`: remote store against a mock HTTP endpoint

pub mod integration_tests;
pub mod views_tests;
