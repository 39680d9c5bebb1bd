use std::sync::Arc;

use thiserror::Error;

use crate::config::AiConfig;

use super::client::{ChatCompletion, CompletionRequest};
use super::prompts::{self, PatientSnapshot};

/// Failures of the generation workflow. `Display` carries the user-facing
/// message; backend diagnostic detail is logged where the failure occurs and
/// never exposed to the caller.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("OpenAI API key no configurada")]
    MissingApiKey,

    #[error("No se pudo generar la evolución")]
    EmptyCompletion,

    #[error("Error interno del servidor")]
    Backend { detail: String },
}

impl AiError {
    pub fn backend(detail: impl Into<String>) -> Self {
        AiError::Backend {
            detail: detail.into(),
        }
    }
}

/// Stateless request/response workflow turning a patient snapshot into a
/// SOAP evolution via one external completion call. Concurrent generations,
/// same patient or not, are fully independent.
pub struct EvolutionGenerator {
    credential_configured: bool,
    backend: Arc<dyn ChatCompletion>,
    temperature: f32,
    max_tokens: u32,
}

impl EvolutionGenerator {
    pub fn new(config: &AiConfig, backend: Arc<dyn ChatCompletion>) -> Self {
        Self {
            credential_configured: config.api_key.is_some(),
            backend,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Render the snapshot into the fixed instruction template and request
    /// exactly one completion. Fails fast, before any network call, when the
    /// service credential is absent; an empty completion is a failure, not
    /// an empty success.
    pub async fn generate(&self, snapshot: &PatientSnapshot) -> Result<String, AiError> {
        if !self.credential_configured {
            return Err(AiError::MissingApiKey);
        }

        let request = CompletionRequest {
            system: prompts::SYSTEM_PREAMBLE.to_string(),
            user: prompts::evolution_prompt(snapshot),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let text = self.backend.complete(request).await.map_err(|e| {
            if let AiError::Backend { detail } = &e {
                tracing::error!(detail = %detail, "evolution generation failed");
            }
            e
        })?;

        if text.trim().is_empty() {
            return Err(AiError::EmptyCompletion);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
        reply: String,
    }

    impl CountingBackend {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: reply.to_string(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatCompletion for CountingBackend {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    fn config(api_key: Option<&str>) -> AiConfig {
        AiConfig {
            api_key: api_key.map(|k| k.to_string()),
            base_url: "http://localhost:9".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.3,
            max_tokens: 1500,
            timeout_secs: 30,
        }
    }

    fn sample_snapshot() -> PatientSnapshot {
        PatientSnapshot {
            name: Some("Juan Pérez".to_string()),
            age: Some("45".to_string()),
            gender: Some("Masculino".to_string()),
            diagnosis: Some("Neumonía".to_string()),
            vitals: crate::ai::VitalSigns {
                bp: Some("110/70".to_string()),
                hr: Some("110".to_string()),
                rr: Some("28".to_string()),
                temp: Some("38.5".to_string()),
                sat: Some("88".to_string()),
            },
            ..Default::default()
        }
    }

    const SOAP_REPLY: &str = "SUBJETIVO:\nFebril, disnea.\n\nOBJETIVO:\nCrepitaciones.\n\nANÁLISIS:\nNeumonía grave.\n\nPLAN:\nAntibioticoterapia.";

    #[tokio::test]
    async fn successful_generation_returns_soap_sections_in_order() {
        let backend = CountingBackend::new(SOAP_REPLY);
        let generator = EvolutionGenerator::new(&config(Some("sk-test")), backend.clone());

        let evolution = generator.generate(&sample_snapshot()).await.unwrap();

        assert!(!evolution.is_empty());
        let subjetivo = evolution.find("SUBJETIVO").unwrap();
        let objetivo = evolution.find("OBJETIVO").unwrap();
        let analisis = evolution.find("ANÁLISIS").unwrap();
        let plan = evolution.find("PLAN").unwrap();
        assert!(subjetivo < objetivo && objetivo < analisis && analisis < plan);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn missing_credential_fails_without_calling_backend() {
        let backend = CountingBackend::new(SOAP_REPLY);
        let generator = EvolutionGenerator::new(&config(None), backend.clone());

        let err = generator.generate(&sample_snapshot()).await.unwrap_err();

        assert!(matches!(err, AiError::MissingApiKey));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn empty_completion_is_an_error() {
        let backend = CountingBackend::new("   \n");
        let generator = EvolutionGenerator::new(&config(Some("sk-test")), backend);

        let err = generator.generate(&sample_snapshot()).await.unwrap_err();
        assert!(matches!(err, AiError::EmptyCompletion));
    }

    #[tokio::test]
    async fn backend_failure_surfaces_generic_error() {
        struct FailingBackend;

        #[async_trait]
        impl ChatCompletion for FailingBackend {
            async fn complete(&self, _request: CompletionRequest) -> Result<String, AiError> {
                Err(AiError::backend("connection refused"))
            }
        }

        let generator = EvolutionGenerator::new(&config(Some("sk-test")), Arc::new(FailingBackend));

        let err = generator.generate(&sample_snapshot()).await.unwrap_err();
        assert_eq!(err.to_string(), "Error interno del servidor");
    }

    #[tokio::test]
    async fn concurrent_generations_are_independent() {
        let backend = CountingBackend::new(SOAP_REPLY);
        let generator =
            Arc::new(EvolutionGenerator::new(&config(Some("sk-test")), backend.clone()));

        let snapshot = sample_snapshot();
        let (a, b) = tokio::join!(generator.generate(&snapshot), generator.generate(&snapshot));

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(backend.calls(), 2);
    }
}
