// ABOUTME: Terminal host for the taglet mention engine
// ABOUTME: A single-line message composer with @file mentions and #tags

pub mod app;
pub mod cli;
pub mod config;
pub mod document;
pub mod files;
pub mod ui;

pub use app::App;
pub use config::{DemoConfig, TagletConfig};
pub use document::LineDocument;
