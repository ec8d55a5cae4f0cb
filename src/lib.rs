//! Artisan marketplace assistant: AI-backed guidance for naming, marketing
//! and pricing handmade products, plus a CSV-backed product catalog.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod store;
pub mod templates;
pub mod types;
pub mod web;
