//! # Battlefield, graveyard and exile zones
use crate::card::{CardDefinition, CardInstance, InstanceId};
use crate::error::Error;
use crate::hand::Hand;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// ZoneId names a place a drawn card can be.
/// `Hand` is only ever a source; every other zone is a drop target
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneId {
  Hand,
  BattlefieldLands,
  BattlefieldCreatures,
  BattlefieldOther,
  Graveyard,
  Exile,
}

impl ZoneId {
  /// Every zone owned by `Zones`, in display order
  pub const BOARD: [ZoneId; 5] = [
    ZoneId::BattlefieldLands,
    ZoneId::BattlefieldCreatures,
    ZoneId::BattlefieldOther,
    ZoneId::Graveyard,
    ZoneId::Exile,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Hand => "hand",
      Self::BattlefieldLands => "battlefield-lands",
      Self::BattlefieldCreatures => "battlefield-creatures",
      Self::BattlefieldOther => "battlefield-other",
      Self::Graveyard => "graveyard",
      Self::Exile => "exile",
    }
  }

  /// Returns true if this zone accepts a card of the given definition.
  /// Lands go to battlefield-lands, creatures to battlefield-creatures, everything
  /// else to battlefield-other. The graveyard and exile accept anything
  pub fn accepts(self, definition: &CardDefinition) -> bool {
    match self {
      Self::Hand => false,
      Self::BattlefieldLands => definition.is_land(),
      Self::BattlefieldCreatures => definition.is_creature(),
      Self::BattlefieldOther => !definition.is_land() && !definition.is_creature(),
      Self::Graveyard | Self::Exile => true,
    }
  }
}

/// Returns true if `zone` is a valid drop target for a card of `definition`
#[inline]
pub fn is_valid_drop_target(zone: ZoneId, definition: &CardDefinition) -> bool {
  zone.accepts(definition)
}

impl fmt::Display for ZoneId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ZoneId {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, String> {
    let zone = match s {
      "hand" => Self::Hand,
      "battlefield-lands" => Self::BattlefieldLands,
      "battlefield-creatures" => Self::BattlefieldCreatures,
      "battlefield-other" => Self::BattlefieldOther,
      "graveyard" => Self::Graveyard,
      "exile" => Self::Exile,
      _ => return Err(format!("unknown zone \"{}\"", s)),
    };
    Ok(zone)
  }
}

/// MoveOutcome describes what a successful move request did
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
  /// The card left its source and entered the target
  Moved,
  /// Nothing changed: the source no longer held the card, the card was already in the
  /// target, or the move was not from the hand
  Unchanged,
}

/// Zones holds the cards moved out of the hand.
/// Battlefield zones are sets ordered by instance id; the graveyard and exile are
/// stacks with the most recent card last
#[derive(Debug, Clone, Default)]
pub struct Zones {
  lands: BTreeMap<InstanceId, CardInstance>,
  creatures: BTreeMap<InstanceId, CardInstance>,
  other: BTreeMap<InstanceId, CardInstance>,
  graveyard: Vec<CardInstance>,
  exile: Vec<CardInstance>,
  /// Authoritative zone of every card held here
  locations: HashMap<InstanceId, ZoneId>,
}

impl Zones {
  pub fn new() -> Self {
    Self::default()
  }

  /// Moves a card from `source` to `target`. Only moves out of the hand change anything.
  ///
  /// A request whose source does not hold the card is ignored, which makes a repeated
  /// drop of the same card harmless. A target that does not accept the card type is an
  /// `InvalidDropTarget` error and leaves everything untouched.
  pub fn move_instance(
    &mut self,
    hand: &mut Hand,
    id: &InstanceId,
    source: ZoneId,
    target: ZoneId,
  ) -> Result<MoveOutcome, Error> {
    let definition = match source {
      ZoneId::Hand => hand
        .cards()
        .iter()
        .find(|c| &c.id == id)
        .map(|c| &c.definition),
      zone => self.get(zone, id).map(|c| &c.definition),
    };
    let definition = match definition {
      Some(definition) => definition,
      None => {
        debug!("Ignoring move of {}: not in {}", id, source);
        return Ok(MoveOutcome::Unchanged);
      }
    };
    if source == target {
      return Ok(MoveOutcome::Unchanged);
    }
    if !target.accepts(definition) {
      debug!("Rejecting move of {} to {}", id, target);
      return Err(Error::InvalidDropTarget {
        instance: id.clone(),
        zone: target,
      });
    }
    if source != ZoneId::Hand {
      warn!(
        "Ignoring move of {} from {} to {}: only moves from the hand are supported",
        id, source, target
      );
      return Ok(MoveOutcome::Unchanged);
    }
    if let Some(instance) = hand.take(id) {
      self.place(target, instance);
    }
    Ok(MoveOutcome::Moved)
  }

  /// Returns the zone currently holding the card, if any
  pub fn location(&self, id: &InstanceId) -> Option<ZoneId> {
    self.locations.get(id).copied()
  }

  /// Returns the card with `id` if `zone` holds it
  pub fn get(&self, zone: ZoneId, id: &InstanceId) -> Option<&CardInstance> {
    if self.location(id) != Some(zone) {
      return None;
    }
    match zone {
      ZoneId::Hand => None,
      ZoneId::BattlefieldLands => self.lands.get(id),
      ZoneId::BattlefieldCreatures => self.creatures.get(id),
      ZoneId::BattlefieldOther => self.other.get(id),
      ZoneId::Graveyard => self.graveyard.iter().find(|c| &c.id == id),
      ZoneId::Exile => self.exile.iter().find(|c| &c.id == id),
    }
  }

  /// Returns the cards in `zone`. Battlefield zones are ordered by instance id,
  /// the graveyard and exile by arrival
  pub fn cards(&self, zone: ZoneId) -> Vec<&CardInstance> {
    match zone {
      ZoneId::Hand => Vec::new(),
      ZoneId::BattlefieldLands => self.lands.values().collect(),
      ZoneId::BattlefieldCreatures => self.creatures.values().collect(),
      ZoneId::BattlefieldOther => self.other.values().collect(),
      ZoneId::Graveyard => self.graveyard.iter().collect(),
      ZoneId::Exile => self.exile.iter().collect(),
    }
  }

  /// Returns an iterator over every card in every zone
  pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
    self
      .lands
      .values()
      .chain(self.creatures.values())
      .chain(self.other.values())
      .chain(self.graveyard.iter())
      .chain(self.exile.iter())
  }

  pub fn zone_len(&self, zone: ZoneId) -> usize {
    match zone {
      ZoneId::Hand => 0,
      ZoneId::BattlefieldLands => self.lands.len(),
      ZoneId::BattlefieldCreatures => self.creatures.len(),
      ZoneId::BattlefieldOther => self.other.len(),
      ZoneId::Graveyard => self.graveyard.len(),
      ZoneId::Exile => self.exile.len(),
    }
  }

  /// Returns the number of cards across all zones
  #[inline]
  pub fn len(&self) -> usize {
    self.locations.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.locations.is_empty()
  }

  pub fn clear(&mut self) {
    self.lands.clear();
    self.creatures.clear();
    self.other.clear();
    self.graveyard.clear();
    self.exile.clear();
    self.locations.clear();
  }

  fn place(&mut self, zone: ZoneId, instance: CardInstance) {
    self.locations.insert(instance.id.clone(), zone);
    match zone {
      ZoneId::Hand => unreachable!("the hand is not a zone target"),
      ZoneId::BattlefieldLands => {
        self.lands.insert(instance.id.clone(), instance);
      }
      ZoneId::BattlefieldCreatures => {
        self.creatures.insert(instance.id.clone(), instance);
      }
      ZoneId::BattlefieldOther => {
        self.other.insert(instance.id.clone(), instance);
      }
      ZoneId::Graveyard => self.graveyard.push(instance),
      ZoneId::Exile => self.exile.push(instance),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::card::*;
  use crate::deck::*;
  use crate::error::Error;
  use crate::hand::Hand;
  use crate::zone::*;
  use rand::rngs::SmallRng;
  use rand::SeedableRng;

  // A hand holding, in order: Forest, Grizzly Bears, Opt, Forest, Sol Ring, Forest, Grizzly Bears
  fn opening_hand() -> Hand {
    let mut deck = DeckDefinition::new();
    deck.mainboard.push(DeckEntry::new(
      CardDefinition::new("Forest", "Basic Land — Forest"),
      3,
    ));
    deck.mainboard.push(DeckEntry::new(
      CardDefinition::new("Grizzly Bears", "Creature — Bear"),
      2,
    ));
    deck
      .mainboard
      .push(DeckEntry::new(CardDefinition::new("Opt", "Instant"), 1));
    deck
      .mainboard
      .push(DeckEntry::new(CardDefinition::new("Sol Ring", "Artifact"), 1));
    let expanded = deck.expand().unwrap();
    let mut hand = Hand::new(&expanded, &mut SmallRng::seed_from_u64(3));
    hand.draw_opening_hand().unwrap();
    hand
  }

  fn find(hand: &Hand, name: &str) -> InstanceId {
    hand
      .cards()
      .iter()
      .find(|c| c.definition.name == name)
      .map(|c| c.id.clone())
      .unwrap()
  }

  #[test]
  fn drop_target_table() {
    let forest = CardDefinition::new("Forest", "Basic Land — Forest");
    let bears = CardDefinition::new("Grizzly Bears", "Creature — Bear");
    let opt = CardDefinition::new("Opt", "Instant");
    let untyped = CardDefinition::new("Mystery", "");
    assert!(is_valid_drop_target(ZoneId::BattlefieldLands, &forest));
    assert!(!is_valid_drop_target(ZoneId::BattlefieldCreatures, &forest));
    assert!(!is_valid_drop_target(ZoneId::BattlefieldOther, &forest));
    assert!(is_valid_drop_target(ZoneId::BattlefieldCreatures, &bears));
    assert!(!is_valid_drop_target(ZoneId::BattlefieldOther, &bears));
    assert!(is_valid_drop_target(ZoneId::BattlefieldOther, &opt));
    assert!(is_valid_drop_target(ZoneId::BattlefieldOther, &untyped));
    assert!(!is_valid_drop_target(ZoneId::BattlefieldLands, &untyped));
    for card in &[&forest, &bears, &opt] {
      assert!(is_valid_drop_target(ZoneId::Graveyard, card));
      assert!(is_valid_drop_target(ZoneId::Exile, card));
      assert!(!is_valid_drop_target(ZoneId::Hand, card));
    }
  }

  #[test]
  fn zone_names_round_trip() {
    for zone in ZoneId::BOARD.iter().chain(std::iter::once(&ZoneId::Hand)) {
      assert_eq!(zone.as_str().parse::<ZoneId>(), Ok(*zone));
      assert_eq!(
        serde_json::to_value(zone).unwrap(),
        serde_json::json!(zone.as_str())
      );
    }
    assert!("library".parse::<ZoneId>().is_err());
  }

  #[test]
  fn move_land_to_battlefield() {
    let mut hand = opening_hand();
    let mut zones = Zones::new();
    let forest = find(&hand, "Forest");
    let outcome = zones
      .move_instance(&mut hand, &forest, ZoneId::Hand, ZoneId::BattlefieldLands)
      .unwrap();
    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(zones.location(&forest), Some(ZoneId::BattlefieldLands));
    assert!(!hand.contains(&forest));
    assert_eq!(hand.len(), 6);
    assert_eq!(zones.len(), 1);
  }

  #[test]
  fn land_rejected_by_creatures() {
    let mut hand = opening_hand();
    let mut zones = Zones::new();
    let forest = find(&hand, "Forest");
    let err = zones
      .move_instance(&mut hand, &forest, ZoneId::Hand, ZoneId::BattlefieldCreatures)
      .unwrap_err();
    assert_eq!(
      err,
      Error::InvalidDropTarget {
        instance: forest.clone(),
        zone: ZoneId::BattlefieldCreatures
      }
    );
    assert!(hand.contains(&forest));
    assert!(zones.is_empty());
  }

  #[test]
  fn repeated_move_is_idempotent() {
    let mut hand = opening_hand();
    let mut zones = Zones::new();
    let bears = find(&hand, "Grizzly Bears");
    for _ in 0..2 {
      zones
        .move_instance(&mut hand, &bears, ZoneId::Hand, ZoneId::Graveyard)
        .unwrap();
    }
    assert_eq!(zones.cards(ZoneId::Graveyard).len(), 1);
    assert_eq!(zones.len(), 1);
    assert_eq!(hand.len(), 6);
    let outcome = zones
      .move_instance(&mut hand, &bears, ZoneId::Graveyard, ZoneId::Graveyard)
      .unwrap();
    assert_eq!(outcome, MoveOutcome::Unchanged);
    assert_eq!(zones.zone_len(ZoneId::Graveyard), 1);
  }

  #[test]
  fn zone_to_zone_is_ignored() {
    let mut hand = opening_hand();
    let mut zones = Zones::new();
    let opt = find(&hand, "Opt");
    zones
      .move_instance(&mut hand, &opt, ZoneId::Hand, ZoneId::Graveyard)
      .unwrap();
    let outcome = zones
      .move_instance(&mut hand, &opt, ZoneId::Graveyard, ZoneId::Exile)
      .unwrap();
    assert_eq!(outcome, MoveOutcome::Unchanged);
    assert_eq!(zones.location(&opt), Some(ZoneId::Graveyard));
    assert!(zones.cards(ZoneId::Exile).is_empty());
  }

  #[test]
  fn graveyard_keeps_arrival_order() {
    let mut hand = opening_hand();
    let mut zones = Zones::new();
    let ids: Vec<_> = hand.cards().iter().map(|c| c.id.clone()).collect();
    for id in ids.iter().rev() {
      zones
        .move_instance(&mut hand, id, ZoneId::Hand, ZoneId::Graveyard)
        .unwrap();
    }
    let order: Vec<_> = zones
      .cards(ZoneId::Graveyard)
      .iter()
      .map(|c| c.id.clone())
      .collect();
    let expected: Vec<_> = ids.into_iter().rev().collect();
    assert_eq!(order, expected);
    assert!(hand.is_empty());
  }

  #[test]
  fn unknown_instance_is_ignored() {
    let mut hand = opening_hand();
    let mut zones = Zones::new();
    let outcome = zones
      .move_instance(
        &mut hand,
        &InstanceId::from("Nope#0"),
        ZoneId::Hand,
        ZoneId::Exile,
      )
      .unwrap();
    assert_eq!(outcome, MoveOutcome::Unchanged);
    assert_eq!(hand.len(), 7);
  }

  #[test]
  fn clear_empties_every_zone() {
    let mut hand = opening_hand();
    let mut zones = Zones::new();
    let forest = find(&hand, "Forest");
    let sol_ring = find(&hand, "Sol Ring");
    zones
      .move_instance(&mut hand, &forest, ZoneId::Hand, ZoneId::BattlefieldLands)
      .unwrap();
    zones
      .move_instance(&mut hand, &sol_ring, ZoneId::Hand, ZoneId::BattlefieldOther)
      .unwrap();
    assert_eq!(zones.iter().count(), 2);
    zones.clear();
    assert!(zones.is_empty());
    assert_eq!(zones.location(&forest), None);
    for zone in ZoneId::BOARD.iter() {
      assert_eq!(zones.zone_len(*zone), 0);
    }
  }
}
