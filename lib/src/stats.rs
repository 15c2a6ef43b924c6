//! # Deck and hand statistics
//!
//! `analyze` is a pure function of a card list, so the same code serves the full
//! deck, the current hand, or any zone.
use crate::card::{type_line_has, CardDefinition, CardInstance, ColorCount, ManaPips};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Mana values 0 through 6 get a bucket each, 7 and above share the last
pub const CURVE_BUCKETS: usize = 8;

/// CardType is the broad category of a card, taken from its primary face type line
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardType {
  Creature,
  Instant,
  Sorcery,
  Artifact,
  Enchantment,
  Planeswalker,
  Land,
  Battle,
  Other,
}

impl CardType {
  /// Categories in matching order; the first one found in the type line wins
  pub const ORDERED: [CardType; 8] = [
    CardType::Creature,
    CardType::Instant,
    CardType::Sorcery,
    CardType::Artifact,
    CardType::Enchantment,
    CardType::Planeswalker,
    CardType::Land,
    CardType::Battle,
  ];

  pub fn classify(type_line: &str) -> Self {
    Self::ORDERED
      .iter()
      .copied()
      .find(|t| type_line_has(type_line, t.word()))
      .unwrap_or(CardType::Other)
  }

  fn word(self) -> &'static str {
    match self {
      Self::Creature => "creature",
      Self::Instant => "instant",
      Self::Sorcery => "sorcery",
      Self::Artifact => "artifact",
      Self::Enchantment => "enchantment",
      Self::Planeswalker => "planeswalker",
      Self::Land => "land",
      Self::Battle => "battle",
      Self::Other => "",
    }
  }
}

/// Statistics is a snapshot of aggregates over a list of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
  /// Card counts by mana value, lands at 0, 7+ combined
  pub mana_curve_counts: [usize; CURVE_BUCKETS],
  pub type_counts: BTreeMap<CardType, usize>,
  pub color_counts: ColorCount,
  pub pip_counts: ManaPips,
  pub total_cards: usize,
  pub land_count: usize,
  pub nonland_count: usize,
  pub avg_mana_cost_with_lands: f64,
  pub avg_mana_cost_without_lands: f64,
  pub median_mana_cost_with_lands: f64,
  pub median_mana_cost_without_lands: f64,
  pub total_mana_value: f64,
}

impl Default for Statistics {
  fn default() -> Self {
    Self {
      mana_curve_counts: [0; CURVE_BUCKETS],
      type_counts: CardType::ORDERED
        .iter()
        .chain(std::iter::once(&CardType::Other))
        .map(|t| (*t, 0))
        .collect(),
      color_counts: ColorCount::new(),
      pip_counts: ManaPips::new(),
      total_cards: 0,
      land_count: 0,
      nonland_count: 0,
      avg_mana_cost_with_lands: 0.0,
      avg_mana_cost_without_lands: 0.0,
      median_mana_cost_with_lands: 0.0,
      median_mana_cost_without_lands: 0.0,
      total_mana_value: 0.0,
    }
  }
}

impl Statistics {
  /// Returns the count for a card type
  pub fn type_count(&self, card_type: CardType) -> usize {
    self.type_counts.get(&card_type).copied().unwrap_or(0)
  }
}

/// Returns the curve bucket for a mana value
#[inline]
pub fn curve_bucket(mana_value: f64) -> usize {
  let rounded = mana_value.round();
  if rounded.is_nan() || rounded <= 0.0 {
    return 0;
  }
  std::cmp::min(rounded as usize, CURVE_BUCKETS - 1)
}

/// Returns the statistics of a list of card instances
pub fn analyze<'a, I>(cards: I) -> Statistics
where
  I: IntoIterator<Item = &'a CardInstance>,
{
  analyze_definitions(cards.into_iter().map(|c| &c.definition))
}

/// Returns the statistics of a list of card definitions
pub fn analyze_definitions<'a, I>(cards: I) -> Statistics
where
  I: IntoIterator<Item = &'a CardDefinition>,
{
  let mut stats = Statistics::default();
  let mut all_values = Vec::new();
  let mut nonland_values = Vec::new();
  for card in cards {
    let value = card.effective_mana_value();
    stats.mana_curve_counts[curve_bucket(value)] += 1;
    *stats
      .type_counts
      .entry(CardType::classify(&card.type_line))
      .or_insert(0) += 1;
    stats.color_counts.count(&card.color_identity);
    stats
      .pip_counts
      .add(&ManaPips::from_mana_cost(&card.mana_cost));
    all_values.push(value);
    if card.is_land() {
      stats.land_count += 1;
    } else {
      stats.nonland_count += 1;
      nonland_values.push(value);
    }
  }
  stats.total_cards = all_values.len();
  stats.total_mana_value = all_values.iter().sum();
  stats.avg_mana_cost_with_lands = mean(&all_values);
  stats.avg_mana_cost_without_lands = mean(&nonland_values);
  stats.median_mana_cost_with_lands = median(&mut all_values);
  stats.median_mana_cost_without_lands = median(&mut nonland_values);
  stats
}

fn mean(values: &[f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }
  values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &mut [f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }
  values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
  let mid = values.len() / 2;
  if values.len() % 2 == 0 {
    (values[mid - 1] + values[mid]) / 2.0
  } else {
    values[mid]
  }
}
