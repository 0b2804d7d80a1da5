//! Sage-Lens library
//!
//! Drafts documentation for a research topic with two LLM providers, keeps
//! the longer draft, and curates web and video references for it.

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod generate;
pub mod history;
pub mod llm;
pub mod logging;
pub mod orchestrator;
pub mod search;
pub mod tui;
pub mod video;
