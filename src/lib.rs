//! InsightsAI competitor analysis
//!
//! Finds competitor companies through neural search and asks a language model
//! for a structured competitive analysis.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm;
pub mod logging;
pub mod report;
pub mod search;
pub mod session;
