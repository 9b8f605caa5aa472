//! AI tools engine: a catalog of prompt-template tools dispatched to a hosted
//! chat-completion API.
//!
//! The entry point is [`engine::ToolEngine::process_tool`], which validates
//! caller inputs, renders the tool's template, generates under a time budget,
//! and always answers with a [`types::GenerationResult`].

pub mod config;
pub mod engine;
pub mod inference;
pub mod registry;
pub mod tools;
pub mod types;

pub use engine::ToolEngine;
