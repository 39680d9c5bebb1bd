pub mod client;
pub mod generator;
pub mod prompts;

pub use client::{ChatCompletion, CompletionRequest, OpenAiClient};
pub use generator::{AiError, EvolutionGenerator};
pub use prompts::{PatientContext, PatientSnapshot, VitalSigns};
