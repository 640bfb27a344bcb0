#![deny(missing_docs)]

//! A lazily initialised facade over the Google Gemini generative AI API.
//!
//! [`GoogleGenAI`] forwards content generation, image and video generation,
//! token counting, embeddings, chat and file operations to a client built on
//! first use. Every call is guarded by an "API key must be set" check; results
//! are returned exactly as the client produced them.
//!
//! The client sits behind the traits in [`backend`]. [`RestClient`] implements
//! them over the Gemini REST API and is what [`GoogleGenAI::new`] uses.

pub mod backend;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod file;
pub mod genai;
pub mod models;

pub use client::{RestClient, RestClientFactory};
pub use config::ClientConfig;
pub use error::{GoogleGenAIError, Result};
pub use genai::{GoogleGenAI, GoogleGenAIOptions};
