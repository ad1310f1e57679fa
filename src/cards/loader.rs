//! Deck loading from the external deck service.
//!
//! The core never performs I/O itself. A [`DeckSource`] implementation owned
//! by the host does the fetch (keyed by deck id and auth token); this module
//! turns the service's JSON payload into shared definitions and enforces that
//! a deck is never empty. Failures are reported once and never retried here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::definition::{CardDefinition, CardType, CardUid};
use crate::error::DeckError;

/// One card entry as served by the deck endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckCardDto {
    /// Database row id. Not used by the simulation.
    pub card_id: i64,
    /// Stable uid.
    pub card_uid: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-form type string ("Monster", "Building", "Spell").
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    /// Mana cost.
    pub cost: i32,
    /// Base health.
    pub health: i32,
    /// Base attack.
    pub attack: i32,
    /// Display rarity.
    pub rarity: Option<String>,
    /// Display rules text.
    pub rules_text: Option<String>,
}

impl DeckCardDto {
    /// Convert to a definition. Entries without a uid are unusable.
    #[must_use]
    pub fn into_definition(self) -> Option<CardDefinition> {
        let uid = self.card_uid.filter(|uid| !uid.trim().is_empty())?;
        let card_type = self
            .card_type
            .as_deref()
            .map(CardType::parse)
            .unwrap_or_default();

        Some(
            CardDefinition::new(CardUid::new(uid), self.name.unwrap_or_default(), card_type)
                .with_cost(self.cost)
                .with_stats(self.attack, self.health)
                .with_rarity(self.rarity.unwrap_or_default())
                .with_rules_text(self.rules_text.unwrap_or_default()),
        )
    }
}

/// Response envelope of the deck endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckCardsResponse {
    /// "ok"/"success", or an error status.
    pub status: Option<String>,
    /// Cards in deck order.
    pub cards: Vec<DeckCardDto>,
}

/// Parse a deck payload into shared definitions.
///
/// Entries without a uid are dropped. An unknown status or an empty result is
/// an error.
pub fn parse_deck_response(json: &str) -> Result<Vec<Arc<CardDefinition>>, DeckError> {
    let response: DeckCardsResponse = serde_json::from_str(json)?;

    if let Some(status) = response.status.as_deref() {
        let ok = status.eq_ignore_ascii_case("ok") || status.eq_ignore_ascii_case("success");
        if !ok {
            return Err(DeckError::Status(status.to_string()));
        }
    }

    let total = response.cards.len();
    let cards: Vec<_> = response
        .cards
        .into_iter()
        .filter_map(DeckCardDto::into_definition)
        .map(Arc::new)
        .collect();

    if cards.len() < total {
        tracing::warn!(
            dropped = total - cards.len(),
            "deck payload contained entries without a card uid"
        );
    }
    if cards.is_empty() {
        return Err(DeckError::Empty);
    }
    Ok(cards)
}

/// External deck provider.
pub trait DeckSource {
    /// Fetch the raw deck payload for `deck_id`, authenticated by `token`.
    fn fetch(&self, deck_id: u64, token: &str) -> Result<String, DeckError>;
}

/// Fetch and parse a deck. No retry is attempted.
pub fn load_deck(
    source: &dyn DeckSource,
    deck_id: u64,
    token: &str,
) -> Result<Vec<Arc<CardDefinition>>, DeckError> {
    if token.trim().is_empty() {
        return Err(DeckError::Fetch("missing auth token".into()));
    }

    let result = source.fetch(deck_id, token).and_then(|json| parse_deck_response(&json));
    match &result {
        Ok(cards) => tracing::debug!(deck_id, cards = cards.len(), "deck loaded"),
        Err(err) => tracing::warn!(deck_id, error = %err, "deck load failed"),
    }
    result
}

/// In-memory deck source keyed by deck id.
///
/// Used by the headless runner and tests in place of the web service.
#[derive(Clone, Debug, Default)]
pub struct StaticDeckSource {
    payloads: FxHashMap<u64, String>,
}

impl StaticDeckSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `json` for `deck_id` (builder pattern).
    #[must_use]
    pub fn with_payload(mut self, deck_id: u64, json: impl Into<String>) -> Self {
        self.payloads.insert(deck_id, json.into());
        self
    }

    /// Serve a deck built from definitions (builder pattern).
    pub fn with_cards(self, deck_id: u64, cards: &[Arc<CardDefinition>]) -> Result<Self, DeckError> {
        let response = DeckCardsResponse {
            status: Some("ok".into()),
            cards: cards
                .iter()
                .map(|card| DeckCardDto {
                    card_id: 0,
                    card_uid: Some(card.uid.to_string()),
                    name: Some(card.name.clone()),
                    card_type: Some(format!("{:?}", card.card_type)),
                    cost: card.cost,
                    health: card.health,
                    attack: card.attack,
                    rarity: Some(card.rarity.clone()),
                    rules_text: Some(card.rules_text.clone()),
                })
                .collect(),
        };
        let json = serde_json::to_string(&response)?;
        Ok(self.with_payload(deck_id, json))
    }
}

impl DeckSource for StaticDeckSource {
    fn fetch(&self, deck_id: u64, _token: &str) -> Result<String, DeckError> {
        self.payloads
            .get(&deck_id)
            .cloned()
            .ok_or_else(|| DeckError::Fetch(format!("deck {deck_id} not found")))
    }
}
