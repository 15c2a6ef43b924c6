//! # Deck definitions and instance expansion
//!
use crate::card::{CardDefinition, CardInstance, InstanceId};
use crate::error::Error;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::ops::Deref;

/// The most cards a deck may expand to
pub const MAX_DECK_SIZE: usize = 10_000;

fn one() -> i64 {
  1
}

/// DeckDefinition is a constructed deck as provided by the deck collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckDefinition {
  #[serde(default)]
  pub commanders: Vec<CardDefinition>,
  #[serde(default)]
  pub mainboard: Vec<DeckEntry>,
}

/// DeckEntry is a mainboard card along with the number of copies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
  #[serde(default, alias = "card")]
  pub definition: Option<CardDefinition>,
  /// Number of copies, one when omitted
  #[serde(default = "one")]
  pub quantity: i64,
}

impl DeckEntry {
  pub fn new(definition: CardDefinition, quantity: i64) -> Self {
    Self {
      definition: Some(definition),
      quantity,
    }
  }
}

/// ExpandedDeck is the ordered list of every card instance in a deck:
/// commanders first, then the mainboard in entry order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpandedDeck {
  pub cards: Vec<CardInstance>,
}

impl DeckDefinition {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of cards the deck expands to, ignoring invalid quantities.
  /// Saturates instead of overflowing
  pub fn card_count(&self) -> usize {
    self
      .mainboard
      .iter()
      .map(|e| usize::try_from(std::cmp::max(e.quantity, 0)).unwrap_or(usize::MAX))
      .fold(self.commanders.len(), usize::saturating_add)
  }

  /// Expands the deck into uniquely identified card instances.
  /// Instance ids are `<identity>#<ordinal>`, where the ordinal counts copies of the
  /// same identity across the whole deck. A deck larger than `MAX_DECK_SIZE` is invalid
  pub fn expand(&self) -> Result<ExpandedDeck, Error> {
    let size = self.card_count();
    if size > MAX_DECK_SIZE {
      return Err(Error::InvalidDeckData(format!(
        "deck has {} cards, at most {} are allowed",
        size, MAX_DECK_SIZE
      )));
    }
    let mut ordinals: HashMap<String, usize> = HashMap::new();
    let mut cards = Vec::with_capacity(size);
    let mut push = |definition: &CardDefinition| -> Result<(), Error> {
      let identity = definition
        .identity()
        .ok_or_else(|| Error::InvalidDeckData("card has neither an id nor a name".to_string()))?;
      let ordinal = ordinals.entry(identity.to_string()).or_insert(0);
      cards.push(CardInstance::new(
        InstanceId::new(identity, *ordinal),
        definition.clone(),
      ));
      *ordinal += 1;
      Ok(())
    };
    for commander in &self.commanders {
      push(commander)?;
    }
    for (row, entry) in self.mainboard.iter().enumerate() {
      let definition = entry
        .definition
        .as_ref()
        .ok_or_else(|| Error::InvalidDeckData(format!("mainboard entry {} has no card", row)))?;
      if entry.quantity < 0 {
        return Err(Error::InvalidDeckData(format!(
          "mainboard entry {} ({}) has negative quantity {}",
          row, definition.name, entry.quantity
        )));
      }
      for _ in 0..entry.quantity {
        push(definition)?;
      }
    }
    debug!("Expanded deck into {} instances", cards.len());
    Ok(ExpandedDeck { cards })
  }
}

impl Deref for ExpandedDeck {
  type Target = [CardInstance];

  fn deref(&self) -> &Self::Target {
    &self.cards
  }
}

#[cfg(test)]
mod tests {
  use crate::card::*;
  use crate::deck::*;
  use crate::error::Error;
  use std::collections::HashSet;

  fn deck(json: serde_json::Value) -> DeckDefinition {
    serde_json::from_value(json).expect("bad deck json")
  }

  #[test]
  fn commanders_come_first() {
    let deck = deck(serde_json::json!({
      "commanders": [{ "name": "Atraxa", "type_line": "Legendary Creature — Phyrexian Angel Horror" }],
      "mainboard": [
        { "card": { "name": "Forest", "type_line": "Basic Land — Forest" }, "quantity": 3 },
        { "card": { "name": "Sol Ring", "type_line": "Artifact" }, "quantity": 1 }
      ]
    }));
    let expanded = deck.expand().unwrap();
    assert_eq!(expanded.len(), 5);
    assert_eq!(deck.card_count(), 5);
    assert_eq!(expanded[0].definition.name, "Atraxa");
    assert_eq!(expanded[1].id.as_str(), "Forest#0");
    assert_eq!(expanded[3].id.as_str(), "Forest#2");
    assert_eq!(expanded[4].id.as_str(), "Sol Ring#0");
  }

  #[test]
  fn instance_ids_are_unique_across_repeated_entries() {
    let forest = CardDefinition::new("Forest", "Basic Land — Forest");
    let mut deck = DeckDefinition::new();
    deck.commanders.push(forest.clone());
    deck.mainboard.push(DeckEntry::new(forest.clone(), 2));
    deck.mainboard.push(DeckEntry::new(forest, 2));
    let expanded = deck.expand().unwrap();
    let ids: HashSet<_> = expanded.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids.len(), 5);
  }

  #[test]
  fn id_is_preferred_over_name() {
    let deck = deck(serde_json::json!({
      "mainboard": [{ "definition": { "id": "f-1", "name": "Forest" }, "quantity": 1 }]
    }));
    assert_eq!(deck.expand().unwrap()[0].id.as_str(), "f-1#0");
  }

  #[test]
  fn zero_quantity_contributes_nothing() {
    let mut deck = DeckDefinition::new();
    deck
      .mainboard
      .push(DeckEntry::new(CardDefinition::new("Opt", "Instant"), 0));
    assert!(deck.expand().unwrap().is_empty());
  }

  #[test]
  fn negative_quantity_is_invalid() {
    let mut deck = DeckDefinition::new();
    deck
      .mainboard
      .push(DeckEntry::new(CardDefinition::new("Opt", "Instant"), -1));
    match deck.expand() {
      Err(Error::InvalidDeckData(_)) => {}
      other => panic!("expected InvalidDeckData, got {:?}", other),
    }
  }

  #[test]
  fn oversized_quantity_is_invalid() {
    let forest = CardDefinition::new("Forest", "Land");
    let mut deck = DeckDefinition::new();
    deck.mainboard
      .push(DeckEntry::new(forest.clone(), 1_000_000_000_000_000_000));
    assert!(matches!(deck.expand(), Err(Error::InvalidDeckData(_))));

    let mut deck = DeckDefinition::new();
    deck.mainboard.push(DeckEntry::new(forest.clone(), i64::MAX));
    deck.mainboard.push(DeckEntry::new(forest.clone(), i64::MAX));
    deck.mainboard.push(DeckEntry::new(forest.clone(), i64::MAX));
    assert_eq!(deck.card_count(), usize::MAX);
    assert!(matches!(deck.expand(), Err(Error::InvalidDeckData(_))));

    let mut deck = DeckDefinition::new();
    deck.mainboard
      .push(DeckEntry::new(forest, MAX_DECK_SIZE as i64));
    assert_eq!(deck.expand().unwrap().len(), MAX_DECK_SIZE);
  }

  #[test]
  fn missing_quantity_is_one_copy() {
    let deck = deck(serde_json::json!({
      "mainboard": [{ "card": { "name": "Sol Ring", "type_line": "Artifact" } }]
    }));
    assert_eq!(deck.expand().unwrap().len(), 1);
  }

  #[test]
  fn missing_identity_is_invalid() {
    let deck = deck(serde_json::json!({
      "mainboard": [{ "card": { "type_line": "Instant" }, "quantity": 1 }]
    }));
    assert!(matches!(deck.expand(), Err(Error::InvalidDeckData(_))));
  }

  #[test]
  fn missing_definition_is_invalid() {
    let deck = deck(serde_json::json!({ "mainboard": [{ "quantity": 2 }] }));
    assert!(matches!(deck.expand(), Err(Error::InvalidDeckData(_))));
  }
}
