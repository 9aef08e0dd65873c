//! AI advice generation for analyzed content.
//!
//! Provides the advice pipeline: the [`llm::TextGenerator`] capability with
//! an OpenAI-compatible client, prompt construction, and the fail-closed
//! [`advisor::Advisor`] that assembles a renderable [`advisor::CheckReport`].

pub mod advisor;
pub mod llm;
pub mod prompt;
