//! # Hand simulation session
//!
//! A `Session` holds everything derived from one loaded deck: the expanded deck,
//! the draw state, the zones, the drag session and the random number generator.
//! Loading another deck means building another `Session`.
use crate::card::{CardInstance, InstanceId};
use crate::deck::{DeckDefinition, ExpandedDeck};
use crate::drag::DragSession;
use crate::error::Error;
use crate::hand::{Hand, KeepRecord, Phase};
use crate::stats::{analyze, Statistics};
use crate::store::DeckStore;
use crate::zone::{MoveOutcome, ZoneId, Zones};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashSet};

/// SessionConfig configures a new session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
  /// Seeds every shuffle of the session. Sessions with the same seed and the same
  /// sequence of operations deal the same cards. Unset means seeded from entropy
  #[serde(default)]
  pub seed: Option<u64>,
}

/// Location is where a card instance currently is
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
  /// Not yet drawn
  Library,
  Zone(ZoneId),
}

/// DropReport tells the caller which card a drop affected and what happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropReport {
  pub instance: InstanceId,
  pub source: ZoneId,
  /// None when the card was dropped outside every zone
  pub target: Option<ZoneId>,
  pub outcome: MoveOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragView {
  pub instance: InstanceId,
  pub source: ZoneId,
  pub active: bool,
  pub candidate: Option<ZoneId>,
}

/// SessionView is a serializable snapshot of a session for the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
  pub phase: Phase,
  pub mulligan_count: usize,
  pub cursor: usize,
  pub library_count: usize,
  pub hand: Vec<CardInstance>,
  pub zones: BTreeMap<ZoneId, Vec<CardInstance>>,
  pub drag: Option<DragView>,
  pub last_keep: Option<KeepRecord>,
}

#[derive(Debug, Clone)]
pub struct Session {
  deck: ExpandedDeck,
  hand: Hand,
  zones: Zones,
  drag: DragSession,
  rng: SmallRng,
}

impl Session {
  /// Expands and shuffles `definition` into a new session
  pub fn new(definition: &DeckDefinition, config: &SessionConfig) -> Result<Self, Error> {
    let deck = definition.expand()?;
    let mut rng = match config.seed {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_entropy(),
    };
    let hand = Hand::new(&deck, &mut rng);
    info!("New session with {} cards", deck.len());
    Ok(Self {
      deck,
      hand,
      zones: Zones::new(),
      drag: DragSession::new(),
      rng,
    })
  }

  /// Loads the deck named `name` from `store` into a new session.
  /// Load failures are returned as is, without retrying
  pub fn load<S: DeckStore + ?Sized>(
    store: &S,
    name: &str,
    config: &SessionConfig,
  ) -> Result<Self, Error> {
    let definition = store.load(name).map_err(|e| {
      warn!("Failed to load deck \"{}\": {}", name, e);
      match e {
        Error::DeckLoadFailure(_) => e,
        other => Error::DeckLoadFailure(other.to_string()),
      }
    })?;
    Self::new(&definition, config)
  }

  pub fn draw_opening_hand(&mut self) -> Result<&[CardInstance], Error> {
    self.hand.draw_opening_hand()
  }

  /// Takes a mulligan. The whole deck is reshuffled, so every zone is emptied
  /// and any drag is abandoned
  pub fn mulligan(&mut self) -> Result<&[CardInstance], Error> {
    self.hand.mulligan(&self.deck, &mut self.rng)?;
    self.zones.clear();
    self.drag.clear();
    Ok(self.hand.cards())
  }

  pub fn draw_next_card(&mut self) -> Result<&CardInstance, Error> {
    self.hand.draw_next_card()
  }

  /// Deals a fresh seven from a reshuffled deck without counting a mulligan.
  /// Every zone is emptied and any drag is abandoned
  pub fn draw_new_hand(&mut self) -> Result<&[CardInstance], Error> {
    self.hand.draw_new_hand(&self.deck, &mut self.rng)?;
    self.zones.clear();
    self.drag.clear();
    Ok(self.hand.cards())
  }

  pub fn keep_hand(&mut self) -> &KeepRecord {
    self.hand.keep_hand()
  }

  /// Reshuffles the deck and clears the hand, the zones, the mulligan count and the drag
  pub fn reset(&mut self) {
    self.drag.clear();
    self.zones.clear();
    self.hand.reset(&self.deck, &mut self.rng);
    info!("Session reset");
  }

  /// Moves a card from `source` to `target`. See `Zones::move_instance`
  pub fn move_instance(
    &mut self,
    id: &InstanceId,
    source: ZoneId,
    target: ZoneId,
  ) -> Result<MoveOutcome, Error> {
    self.zones.move_instance(&mut self.hand, id, source, target)
  }

  /// Starts dragging the card `id` out of `source`, replacing any drag in flight.
  /// Returns false, leaving no drag, if `source` does not hold the card
  pub fn drag_start(&mut self, id: &InstanceId, source: ZoneId) -> bool {
    let instance = match source {
      ZoneId::Hand => self.hand.cards().iter().find(|c| &c.id == id),
      zone => self.zones.get(zone, id),
    }
    .cloned();
    match instance {
      Some(instance) => {
        self.drag.start(instance, source);
        true
      }
      None => {
        debug!("Cannot drag {}: not in {}", id, source);
        self.drag.clear();
        false
      }
    }
  }

  /// Returns true if `target` accepts the dragged card
  pub fn drag_over(&mut self, target: ZoneId) -> bool {
    self.drag.over(target)
  }

  pub fn drag_leave(&mut self) {
    self.drag.leave()
  }

  pub fn drag_end(&mut self) {
    self.drag.end()
  }

  /// Drops the dragged card on `target`, or outside every zone when `target` is None.
  /// The drag is always cleared. Returns None when there was nothing to drop
  pub fn drop_card(&mut self, target: Option<ZoneId>) -> Result<Option<DropReport>, Error> {
    let (instance, source) = match self.drag.take() {
      Some(payload) => payload,
      None => return Ok(None),
    };
    let target_zone = match target {
      Some(zone) => zone,
      None => {
        debug!("Drop of {} cancelled", instance.id);
        return Ok(Some(DropReport {
          instance: instance.id,
          source,
          target: None,
          outcome: MoveOutcome::Unchanged,
        }));
      }
    };
    let outcome = self.move_instance(&instance.id, source, target_zone)?;
    Ok(Some(DropReport {
      instance: instance.id,
      source,
      target,
      outcome,
    }))
  }

  /// Returns where the card `id` is, or None if it is not part of this deck
  pub fn location_of(&self, id: &InstanceId) -> Option<Location> {
    if self.hand.contains(id) {
      return Some(Location::Zone(ZoneId::Hand));
    }
    if let Some(zone) = self.zones.location(id) {
      return Some(Location::Zone(zone));
    }
    if self.hand.remaining().iter().any(|c| &c.id == id) {
      return Some(Location::Library);
    }
    None
  }

  /// Returns true if every card of the deck is in exactly one of the undrawn
  /// library, the hand, or a zone
  pub fn is_conserved(&self) -> bool {
    let mut seen = HashSet::with_capacity(self.deck.len());
    let all_unique = self
      .hand
      .remaining()
      .iter()
      .chain(self.hand.cards().iter())
      .chain(self.zones.iter())
      .all(|c| seen.insert(c.id.clone()));
    all_unique
      && seen.len() == self.deck.len()
      && self.deck.iter().all(|c| seen.contains(&c.id))
  }

  /// Returns the statistics of the whole deck
  pub fn deck_statistics(&self) -> Statistics {
    analyze(self.deck.iter())
  }

  /// Returns the statistics of the current hand
  pub fn hand_statistics(&self) -> Statistics {
    analyze(self.hand.cards())
  }

  /// Returns the statistics of a single zone
  pub fn zone_statistics(&self, zone: ZoneId) -> Statistics {
    if zone == ZoneId::Hand {
      return self.hand_statistics();
    }
    analyze(self.zones.cards(zone))
  }

  pub fn view(&self) -> SessionView {
    SessionView {
      phase: self.hand.phase(),
      mulligan_count: self.hand.mulligan_count(),
      cursor: self.hand.cursor(),
      library_count: self.hand.remaining().len(),
      hand: self.hand.cards().to_vec(),
      zones: ZoneId::BOARD
        .iter()
        .map(|zone| {
          let cards = self.zones.cards(*zone).into_iter().cloned().collect();
          (*zone, cards)
        })
        .collect(),
      drag: match (self.drag.instance(), self.drag.source()) {
        (Some(instance), Some(source)) => Some(DragView {
          instance: instance.id.clone(),
          source,
          active: self.drag.is_active(),
          candidate: self.drag.candidate(),
        }),
        _ => None,
      },
      last_keep: self.hand.last_keep().cloned(),
    }
  }

  #[inline]
  pub fn deck(&self) -> &ExpandedDeck {
    &self.deck
  }

  #[inline]
  pub fn hand(&self) -> &Hand {
    &self.hand
  }

  #[inline]
  pub fn zones(&self) -> &Zones {
    &self.zones
  }

  #[inline]
  pub fn drag(&self) -> &DragSession {
    &self.drag
  }
}
