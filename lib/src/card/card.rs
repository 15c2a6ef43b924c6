//! # Card definitions and instances
//!
use crate::card::mana_cost::{mana_value_from_str, ManaColor};
use std::collections::BTreeSet;
use std::fmt;

/// CardData is the card shape emitted by the deck collaborator. Both Scryfall
/// style (`type_line`, `cmc`) and MTGJSON style (`type`, `manaValue`) keys are accepted.
/// Keys that may legitimately appear together in one object are kept as separate fields
/// so serde does not reject them as duplicates.
#[derive(Debug, Clone, Default, Deserialize)]
struct CardData {
  #[serde(default)]
  name: String,
  #[serde(default)]
  id: Option<String>,
  #[serde(default)]
  oracle_id: Option<String>,
  #[serde(default)]
  uuid: Option<String>,
  #[serde(default, alias = "manaValue")]
  mana_value: Option<f64>,
  #[serde(default)]
  cmc: Option<f64>,
  #[serde(default, rename = "convertedManaCost")]
  converted_mana_cost: Option<f64>,
  #[serde(default)]
  type_line: Option<String>,
  #[serde(default, rename = "type")]
  kind: Option<String>,
  #[serde(default, alias = "colorIdentity")]
  color_identity: Vec<String>,
  #[serde(default, alias = "manaCost")]
  mana_cost: Option<String>,
  #[serde(default)]
  layout: Option<String>,
  #[serde(default)]
  card_faces: Vec<CardFace>,
}

/// A single printed face of a multi-faced card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
  #[serde(default)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub type_line: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mana_cost: Option<String>,
  #[serde(default, alias = "cmc", skip_serializing_if = "Option::is_none")]
  pub mana_value: Option<f64>,
}

/// Layout represents how the faces of a card are arranged.
/// It is resolved once when the card is ingested.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
  Normal,
  Transform,
  ModalDfc,
  Split,
  Flip,
  Adventure,
  Meld,
  #[serde(rename = "reversible_card")]
  Reversible,
  Unknown,
}

impl Layout {
  /// Resolves a layout string. A missing layout on a card that carries faces is `Unknown`
  pub fn resolve(layout: Option<&str>, has_faces: bool) -> Self {
    match layout.map(|l| l.trim().to_lowercase()).as_deref() {
      Some("normal") | Some("leveler") | Some("class") | Some("saga") | Some("case") => {
        Self::Normal
      }
      Some("transform") | Some("double_faced_token") => Self::Transform,
      Some("modal_dfc") => Self::ModalDfc,
      Some("split") | Some("aftermath") => Self::Split,
      Some("flip") => Self::Flip,
      Some("adventure") => Self::Adventure,
      Some("meld") => Self::Meld,
      Some("reversible_card") => Self::Reversible,
      Some(_) => Self::Unknown,
      None if has_faces => Self::Unknown,
      None => Self::Normal,
    }
  }

  /// Returns true for every layout with more than one face
  #[inline]
  pub fn is_multi_faced(self) -> bool {
    self != Self::Normal
  }
}

impl Default for Layout {
  fn default() -> Self {
    Self::Normal
  }
}

/// CardDefinition represents a read-only Magic: The Gathering card as provided by the deck
/// collaborator, with its primary face resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CardData")]
pub struct CardDefinition {
  /// The card name
  pub name: String,
  /// A stable identifier for the card, if the collaborator provides one
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  /// The printed mana value, if provided
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mana_value: Option<f64>,
  /// The type line of the primary face
  pub type_line: String,
  /// The mana cost of the primary face, in "{2}{G}{G}" style format
  pub mana_cost: String,
  /// The color identity
  pub color_identity: BTreeSet<ManaColor>,
  pub layout: Layout,
  #[serde(rename = "card_faces", skip_serializing_if = "Vec::is_empty")]
  pub faces: Vec<CardFace>,
}

impl From<CardData> for CardDefinition {
  fn from(data: CardData) -> Self {
    let layout = Layout::resolve(data.layout.as_deref(), !data.card_faces.is_empty());
    // The primary face is the first face, falling back to the card itself for
    // any attribute the face omits
    let primary = data.card_faces.first();
    let type_line = primary
      .and_then(|f| f.type_line.clone())
      .or(data.type_line)
      .or(data.kind)
      .unwrap_or_default();
    let mana_cost = primary
      .and_then(|f| f.mana_cost.clone())
      .filter(|c| !c.is_empty())
      .or(data.mana_cost)
      .unwrap_or_default();
    let mana_value = data
      .mana_value
      .or(data.cmc)
      .or(data.converted_mana_cost)
      .or_else(|| primary.and_then(|f| f.mana_value));
    let color_identity = data
      .color_identity
      .iter()
      .filter_map(|c| ManaColor::from_symbol(c))
      .collect();
    let id = data.id.or(data.oracle_id).or(data.uuid);
    Self {
      name: data.name.trim().to_string(),
      id: id.filter(|id| !id.trim().is_empty()),
      mana_value,
      type_line,
      mana_cost,
      color_identity,
      layout,
      faces: data.card_faces,
    }
  }
}

impl CardDefinition {
  /// Returns a new card with the given name and type line
  pub fn new(name: &str, type_line: &str) -> Self {
    Self {
      name: name.to_string(),
      type_line: type_line.to_string(),
      ..Self::default()
    }
  }

  /// Returns the identity used to derive instance ids, or None if the card has no identity
  pub fn identity(&self) -> Option<&str> {
    match &self.id {
      Some(id) => Some(id.as_str()),
      None if !self.name.is_empty() => Some(self.name.as_str()),
      None => None,
    }
  }

  /// Returns true if the primary face is a land
  #[inline]
  pub fn is_land(&self) -> bool {
    type_line_has(&self.type_line, "land")
  }

  /// Returns true if the primary face is a creature
  #[inline]
  pub fn is_creature(&self) -> bool {
    type_line_has(&self.type_line, "creature")
  }

  /// Returns the mana value used for curve statistics. Lands are always 0,
  /// and cards without a printed mana value fall back to their mana cost
  pub fn effective_mana_value(&self) -> f64 {
    if self.is_land() {
      return 0.0;
    }
    let value = self
      .mana_value
      .unwrap_or_else(|| mana_value_from_str(&self.mana_cost));
    if value.is_finite() && value > 0.0 {
      value
    } else {
      0.0
    }
  }
}

/// Returns true if `word` appears as a whole word in `type_line`, ignoring case.
/// This is stricter than a substring test: "Basic Land — Island" has "land",
/// "Creature — Wasteland Scout" does not
pub fn type_line_has(type_line: &str, word: &str) -> bool {
  type_line
    .split(|c: char| !c.is_alphanumeric())
    .any(|w| w.eq_ignore_ascii_case(word))
}

/// InstanceId uniquely identifies one copy of a card within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
  pub fn new(identity: &str, ordinal: usize) -> Self {
    Self(format!("{}#{}", identity, ordinal))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for InstanceId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for InstanceId {
  fn from(s: &str) -> Self {
    Self(s.to_string())
  }
}

/// CardInstance is a single physical copy of a card in the expanded deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
  pub id: InstanceId,
  pub definition: CardDefinition,
}

impl CardInstance {
  pub fn new(id: InstanceId, definition: CardDefinition) -> Self {
    Self { id, definition }
  }
}

/// Builds a `CardDefinition` from inline JSON
#[cfg(test)]
macro_rules! card {
  ($($json:tt)+) => {
    serde_json::from_value::<$crate::card::CardDefinition>(serde_json::json!($($json)+))
      .expect("bad card json")
  };
}
