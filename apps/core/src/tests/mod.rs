//! Test Module
//!
//! Crate-level test suites for FarmMate.
//!
//! ## Test Categories
//! - `brain_tests`: classification, templates, fallback, engine
//! - `knowledge_tests`: loading from files and HTTP, reload behavior
//! - `session_tests`: turn-taking, speech, mute and recording
//! - `integration_tests`: configuration through to answered turns


pub mod brain_tests;
