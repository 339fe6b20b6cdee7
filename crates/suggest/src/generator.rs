//! Gift-idea generation orchestration.
//!
//! [`GiftIdeaService::generate`] never fails: any backend problem — missing
//! credential, transport error, non-2xx, unparsable payload, empty idea
//! list — degrades to the deterministic fallback templates, and the result
//! is marked so callers can surface "suggestions are generic" messaging.

use std::sync::Arc;

use async_trait::async_trait;
use happydate_core::gift::{self, GiftIdea, GiftIdeaRequest};
use serde::Deserialize;

use crate::client::{CompletionApi, CompletionError};

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// A source of generated gift ideas. Implemented by [`CompletionApi`] in
/// production and by stubs in tests.
#[async_trait]
pub trait IdeaBackend: Send + Sync {
    async fn suggest(&self, request: &GiftIdeaRequest) -> Result<Vec<GiftIdea>, CompletionError>;
}

/// System instruction sent with every generation request.
const SYSTEM_PROMPT: &str = "Jesteś asystentem HappyDate w Polsce. \
Twoim zadaniem jest zaproponować 3 trafione pomysły na prezent po polsku. \
Każdy pomysł musi mieć: \"title\" (krótki), \"description\" (emocjonalny, z sensem i wskazówką użycia), \
\"price\" (liczba całkowita, przybliżony koszt w PLN, nie większy niż budżet). \
Uwzględnij: osobę (np. mama), okazję, wiek, budżet i preferencje. \
Zwróć WYŁĄCZNIE JSON w formacie: {\"ideas\":[{\"title\":\"\",\"description\":\"\",\"price\":0}, ...]}.";

#[async_trait]
impl IdeaBackend for CompletionApi {
    async fn suggest(&self, request: &GiftIdeaRequest) -> Result<Vec<GiftIdea>, CompletionError> {
        let user = serde_json::to_string(request)
            .map_err(|e| CompletionError::MalformedPayload(e.to_string()))?;
        let content = self.complete(SYSTEM_PROMPT, &user).await?;
        parse_ideas(&content)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Idea item as the backend returns it, before coercion. Tolerates missing
/// fields and loosely typed prices.
#[derive(Debug, Deserialize)]
struct RawIdea {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawIdeaList {
    #[serde(default)]
    ideas: Vec<RawIdea>,
}

/// Parse the backend's message content into ideas.
///
/// The content is expected to be a JSON object with an `ideas` array. If
/// direct parsing fails, one recovery attempt strips code-fence wrapping
/// (models occasionally emit markdown despite the JSON response format)
/// before re-parsing.
pub fn parse_ideas(raw: &str) -> Result<Vec<GiftIdea>, CompletionError> {
    let parsed: RawIdeaList = serde_json::from_str(raw).or_else(|_| {
        serde_json::from_str(strip_code_fence(raw))
            .map_err(|e| CompletionError::MalformedPayload(e.to_string()))
    })?;

    Ok(parsed.ideas.into_iter().map(coerce_idea).collect())
}

/// Strip a leading/trailing markdown code fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .trim_end()
        .trim_end_matches("```")
        .trim()
}

fn coerce_idea(raw: RawIdea) -> GiftIdea {
    GiftIdea {
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        price: raw.price.as_ref().and_then(coerce_price),
    }
}

/// Coerce a loosely typed price into a non-negative integer, or drop it.
fn coerce_price(value: &serde_json::Value) -> Option<u32> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(number.round().max(0.0) as u32)
}

// ---------------------------------------------------------------------------
// GiftIdeaService
// ---------------------------------------------------------------------------

/// Result of a generation pass.
#[derive(Debug, Clone)]
pub struct Suggestions {
    /// 1–3 normalized ideas.
    pub ideas: Vec<GiftIdea>,
    /// True when the deterministic fallback produced the list.
    pub degraded: bool,
}

/// Request-scoped gift-idea generation over an optional backend.
pub struct GiftIdeaService {
    backend: Option<Arc<dyn IdeaBackend>>,
}

impl GiftIdeaService {
    /// Service with a live completion backend.
    pub fn new(backend: Arc<dyn IdeaBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Service without a backend; every request uses the fallback.
    pub fn without_backend() -> Self {
        Self { backend: None }
    }

    /// Produce 1–3 normalized ideas for a validated request.
    ///
    /// Infallible: every failure path lands on the fallback templates,
    /// which perform no I/O.
    pub async fn generate(&self, request: &GiftIdeaRequest) -> Suggestions {
        let backend_ideas = match &self.backend {
            None => None,
            Some(backend) => match backend.suggest(request).await {
                Ok(ideas) => Some(gift::normalize_ideas(ideas)),
                Err(e) => {
                    tracing::warn!(error = %e, "Gift generation failed, using fallback");
                    None
                }
            },
        };

        match backend_ideas {
            Some(ideas) if !ideas.is_empty() => Suggestions {
                ideas,
                degraded: false,
            },
            // Backend missing, failed, or returned nothing usable.
            _ => Suggestions {
                ideas: gift::normalize_ideas(gift::fallback_ideas(request)),
                degraded: true,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GiftIdeaRequest {
        GiftIdeaRequest {
            person: "Mama".to_string(),
            occasion: "birthday".to_string(),
            age: 45,
            budget: 100,
            preferences: String::new(),
        }
    }

    fn idea(title: &str) -> GiftIdea {
        GiftIdea {
            title: title.to_string(),
            description: "opis".to_string(),
            price: Some(50),
        }
    }

    struct StubBackend {
        result: Result<Vec<GiftIdea>, CompletionError>,
    }

    #[async_trait]
    impl IdeaBackend for StubBackend {
        async fn suggest(
            &self,
            _request: &GiftIdeaRequest,
        ) -> Result<Vec<GiftIdea>, CompletionError> {
            match &self.result {
                Ok(ideas) => Ok(ideas.clone()),
                Err(_) => Err(CompletionError::MalformedPayload("stub".to_string())),
            }
        }
    }

    fn service(result: Result<Vec<GiftIdea>, CompletionError>) -> GiftIdeaService {
        GiftIdeaService::new(Arc::new(StubBackend { result }))
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parses_a_plain_json_object() {
        let ideas = parse_ideas(r#"{"ideas":[{"title":"t","description":"d","price":40}]}"#)
            .unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].price, Some(40));
    }

    #[test]
    fn recovers_from_code_fence_wrapping() {
        let fenced = "```json\n{\"ideas\":[{\"title\":\"t\",\"description\":\"d\"}]}\n```";
        let ideas = parse_ideas(fenced).unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].title, "t");
    }

    #[test]
    fn rejects_unparsable_content() {
        assert!(matches!(
            parse_ideas("not json at all"),
            Err(CompletionError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_ideas_array_parses_as_empty() {
        assert!(parse_ideas("{}").unwrap().is_empty());
    }

    #[test]
    fn coerces_loose_prices() {
        let ideas = parse_ideas(
            r#"{"ideas":[
                {"title":"a","description":"d","price":"120"},
                {"title":"b","description":"d","price":49.6},
                {"title":"c","description":"d","price":-5},
                {"title":"d","description":"d","price":{"amount":1}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(ideas[0].price, Some(120));
        assert_eq!(ideas[1].price, Some(50));
        assert_eq!(ideas[2].price, Some(0));
        assert_eq!(ideas[3].price, None);
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn backend_list_is_truncated_to_three() {
        let many = (0..5).map(|i| idea(&format!("t{i}"))).collect();
        let suggestions = service(Ok(many)).generate(&request()).await;

        assert_eq!(suggestions.ideas.len(), 3);
        assert!(!suggestions.degraded);
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_fallback() {
        let suggestions = service(Err(CompletionError::MalformedPayload("x".to_string())))
            .generate(&request())
            .await;

        assert!(suggestions.degraded);
        assert_eq!(suggestions.ideas.len(), 3);
        for idea in &suggestions.ideas {
            assert!(idea.price.unwrap() <= 100);
        }
    }

    #[tokio::test]
    async fn empty_backend_list_degrades_to_fallback() {
        let suggestions = service(Ok(vec![])).generate(&request()).await;
        assert!(suggestions.degraded);
        assert_eq!(suggestions.ideas.len(), 3);
    }

    #[tokio::test]
    async fn unusable_backend_ideas_degrade_to_fallback() {
        // Ideas that normalization drops entirely (no usable title).
        let junk = vec![GiftIdea {
            title: String::new(),
            description: "d".to_string(),
            price: None,
        }];
        let suggestions = service(Ok(junk)).generate(&request()).await;
        assert!(suggestions.degraded);
    }

    #[tokio::test]
    async fn no_backend_is_deterministic_and_degraded() {
        let service = GiftIdeaService::without_backend();
        let first = service.generate(&request()).await;
        let second = service.generate(&request()).await;

        assert!(first.degraded);
        assert_eq!(first.ideas, second.ideas);
    }
}
