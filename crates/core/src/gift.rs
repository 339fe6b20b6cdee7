//! Gift-idea request validation, fallback templates, and normalization.
//!
//! All functions here are pure. The generator crate layers the completion
//! backend on top; whatever list that produces (backend or fallback) passes
//! through [`normalize_ideas`] before it reaches the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of `person` and `occasion` after trimming.
pub const MAX_NAME_LEN: usize = 64;
/// Maximum length of `preferences`; longer input is clamped, never rejected.
pub const MAX_PREFERENCES_LEN: usize = 200;
/// Inclusive upper bound for `age`.
pub const MAX_AGE: i64 = 120;
/// Inclusive upper bound for `budget` (whole currency units).
pub const MAX_BUDGET: i64 = 100_000;

/// Maximum length of an idea title.
pub const MAX_TITLE_LEN: usize = 80;
/// Maximum length of an idea description.
pub const MAX_DESCRIPTION_LEN: usize = 280;
/// Maximum number of ideas returned to the caller.
pub const MAX_IDEAS: usize = 3;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A validated gift-idea request. Construct via [`validate_request`].
#[derive(Debug, Clone, Serialize)]
pub struct GiftIdeaRequest {
    pub person: String,
    pub occasion: String,
    pub age: i64,
    pub budget: i64,
    pub preferences: String,
}

/// Validate a raw JSON request body.
///
/// Accumulates every invalid field name instead of stopping at the first,
/// so clients can highlight all offending form fields at once. String
/// fields are trimmed before length checks; `preferences` is clamped to
/// [`MAX_PREFERENCES_LEN`] characters and never rejected.
pub fn validate_request(body: &Value) -> Result<GiftIdeaRequest, Vec<&'static str>> {
    let mut invalid = Vec::new();

    let person = string_field(body, "person");
    if person.is_empty() || person.chars().count() > MAX_NAME_LEN {
        invalid.push("person");
    }

    let occasion = string_field(body, "occasion");
    if occasion.is_empty() || occasion.chars().count() > MAX_NAME_LEN {
        invalid.push("occasion");
    }

    let age = int_field(body, "age");
    if !age.is_some_and(|a| (0..=MAX_AGE).contains(&a)) {
        invalid.push("age");
    }

    let budget = int_field(body, "budget");
    if !budget.is_some_and(|b| (0..=MAX_BUDGET).contains(&b)) {
        invalid.push("budget");
    }

    let preferences = clip_chars(&string_field(body, "preferences"), MAX_PREFERENCES_LEN);

    if !invalid.is_empty() {
        return Err(invalid);
    }

    Ok(GiftIdeaRequest {
        person,
        occasion,
        age: age.unwrap_or_default(),
        budget: budget.unwrap_or_default(),
        preferences,
    })
}

fn string_field(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Read an integer field, tolerating JSON numbers with a zero fraction and
/// numeric strings (clients serialize form inputs inconsistently).
fn int_field(body: &Value, key: &str) -> Option<i64> {
    match body.get(key)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Ideas
// ---------------------------------------------------------------------------

/// A single gift suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftIdea {
    pub title: String,
    pub description: String,
    /// Approximate cost in whole currency units; omitted when unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

/// Deterministic templated suggestions used when generation is unavailable.
///
/// Performs no I/O and cannot fail; identical input yields identical output.
/// Prices are clamped to the requested budget and omitted at budget zero.
pub fn fallback_ideas(request: &GiftIdeaRequest) -> Vec<GiftIdea> {
    let prefs = if request.preferences.is_empty() {
        String::new()
    } else {
        format!(" (preferencje: {})", request.preferences)
    };

    vec![
        GiftIdea {
            title: "Personalizowany album".to_string(),
            description: format!("Album pełen wspomnień dla {}{prefs}", request.person),
            price: clamp_price(request.budget, 120),
        },
        GiftIdea {
            title: "Voucher SPA".to_string(),
            description: format!(
                "Relaks na {}, dopasowany do budżetu ~{} zł",
                request.occasion, request.budget
            ),
            price: clamp_price(request.budget, 200),
        },
        GiftIdea {
            title: "Kolacja-niespodzianka".to_string(),
            description: format!(
                "Kameralna kolacja dostosowana do wieku {} i gustu obdarowywanej osoby",
                request.age
            ),
            price: clamp_price(request.budget, 180),
        },
    ]
}

fn clamp_price(budget: i64, template_price: i64) -> Option<u32> {
    let price = budget.min(template_price);
    (price > 0).then(|| price as u32)
}

/// Normalize an idea list into the response contract: clip titles and
/// descriptions, drop ideas missing either, cap at [`MAX_IDEAS`].
pub fn normalize_ideas(ideas: Vec<GiftIdea>) -> Vec<GiftIdea> {
    ideas
        .into_iter()
        .filter_map(|idea| {
            let title = clip_chars(idea.title.trim(), MAX_TITLE_LEN);
            let description = clip_chars(idea.description.trim(), MAX_DESCRIPTION_LEN);
            if title.is_empty() || description.is_empty() {
                return None;
            }
            Some(GiftIdea {
                title,
                description,
                price: idea.price,
            })
        })
        .take(MAX_IDEAS)
        .collect()
}

/// Truncate to at most `max` characters on a character boundary.
fn clip_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
