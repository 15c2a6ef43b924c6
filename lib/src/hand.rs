//! # Draw and mulligan controller
use crate::card::{CardInstance, InstanceId};
use crate::deck::ExpandedDeck;
use crate::error::Error;
use crate::shuffle::shuffled;
use chrono::{DateTime, Utc};
use rand::Rng;

/// The number of cards in an opening hand
pub const STARTING_HAND_SIZE: usize = 7;

/// Returns the size of the hand dealt by a mulligan, given the number of
/// mulligans taken before it. Never less than 1
#[inline]
pub fn mulligan_hand_size(mulligan_count: usize) -> usize {
  std::cmp::max(1, STARTING_HAND_SIZE.saturating_sub(mulligan_count + 1))
}

/// Phase of the draw process. `reset` always returns to `Shuffled`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  Shuffled,
  HandDrawn,
  Mulliganed,
  Kept,
}

/// KeepRecord notes that the player accepted a hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepRecord {
  pub mulligan_count: usize,
  pub hand_size: usize,
  pub kept_at: DateTime<Utc>,
}

/// Hand represents the shuffled deck, the position of the next card to draw,
/// and the cards currently held by the player.
/// Every card of the shuffled deck before `cursor` has been drawn; those not in
/// `cards` have been moved to a zone
#[derive(Debug, Clone)]
pub struct Hand {
  sequence: Vec<CardInstance>,
  cursor: usize,
  cards: Vec<CardInstance>,
  mulligan_count: usize,
  phase: Phase,
  last_keep: Option<KeepRecord>,
}

impl Hand {
  /// Returns a new, empty hand over a fresh shuffle of `deck`
  pub fn new(deck: &ExpandedDeck, rng: &mut impl Rng) -> Self {
    Self {
      sequence: shuffled(deck.cards.as_slice(), rng),
      cursor: 0,
      cards: Vec::with_capacity(STARTING_HAND_SIZE),
      mulligan_count: 0,
      phase: Phase::Shuffled,
      last_keep: None,
    }
  }

  /// Draws the opening hand from the current shuffle
  pub fn draw_opening_hand(&mut self) -> Result<&[CardInstance], Error> {
    if !self.cards.is_empty() || self.cursor != 0 {
      return Err(Error::HandAlreadyDrawn);
    }
    self.require(STARTING_HAND_SIZE)?;
    self.deal(STARTING_HAND_SIZE);
    self.phase = Phase::HandDrawn;
    debug!("Drew opening hand of {}", self.cards.len());
    Ok(&self.cards)
  }

  /// Reshuffles the whole deck and deals a hand one card smaller than the last
  pub fn mulligan(
    &mut self,
    deck: &ExpandedDeck,
    rng: &mut impl Rng,
  ) -> Result<&[CardInstance], Error> {
    let hand_size = mulligan_hand_size(self.mulligan_count);
    Self::require_deck(deck, hand_size)?;
    self.sequence = shuffled(deck.cards.as_slice(), rng);
    self.deal(hand_size);
    self.mulligan_count += 1;
    self.phase = Phase::Mulliganed;
    info!(
      "Mulligan {} to {} cards",
      self.mulligan_count,
      self.cards.len()
    );
    Ok(&self.cards)
  }

  /// Draws the next card of the shuffled deck into the hand
  pub fn draw_next_card(&mut self) -> Result<&CardInstance, Error> {
    let card = self
      .sequence
      .get(self.cursor)
      .cloned()
      .ok_or(Error::DeckExhausted)?;
    self.cursor += 1;
    self.cards.push(card);
    Ok(&self.cards[self.cards.len() - 1])
  }

  /// Reshuffles the whole deck and deals a full opening hand without counting a mulligan
  pub fn draw_new_hand(
    &mut self,
    deck: &ExpandedDeck,
    rng: &mut impl Rng,
  ) -> Result<&[CardInstance], Error> {
    Self::require_deck(deck, STARTING_HAND_SIZE)?;
    self.sequence = shuffled(deck.cards.as_slice(), rng);
    self.deal(STARTING_HAND_SIZE);
    self.phase = Phase::HandDrawn;
    debug!("Drew new hand, mulligan count stays {}", self.mulligan_count);
    Ok(&self.cards)
  }

  /// Records that the player accepted the current hand.
  /// Keeping does not prevent further mulligans or draws
  pub fn keep_hand(&mut self) -> &KeepRecord {
    let record = KeepRecord {
      mulligan_count: self.mulligan_count,
      hand_size: self.cards.len(),
      kept_at: Utc::now(),
    };
    info!(
      "Kept {} cards after {} mulligans",
      record.hand_size, record.mulligan_count
    );
    self.phase = Phase::Kept;
    self.last_keep.insert(record)
  }

  /// Reshuffles the whole deck and empties the hand
  pub fn reset(&mut self, deck: &ExpandedDeck, rng: &mut impl Rng) {
    *self = Self::new(deck, rng);
  }

  /// Removes the card with `id` from the hand and returns it
  pub fn take(&mut self, id: &InstanceId) -> Option<CardInstance> {
    let idx = self.cards.iter().position(|c| &c.id == id)?;
    Some(self.cards.remove(idx))
  }

  pub fn contains(&self, id: &InstanceId) -> bool {
    self.cards.iter().any(|c| &c.id == id)
  }

  /// Returns the cards currently held
  #[inline]
  pub fn cards(&self) -> &[CardInstance] {
    &self.cards
  }

  /// Returns the cards of the shuffled deck not yet drawn
  #[inline]
  pub fn remaining(&self) -> &[CardInstance] {
    &self.sequence[self.cursor..]
  }

  /// Returns the full shuffled deck, drawn cards included
  #[inline]
  pub fn sequence(&self) -> &[CardInstance] {
    &self.sequence
  }

  #[inline]
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  #[inline]
  pub fn mulligan_count(&self) -> usize {
    self.mulligan_count
  }

  #[inline]
  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn last_keep(&self) -> Option<&KeepRecord> {
    self.last_keep.as_ref()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.cards.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  fn deal(&mut self, hand_size: usize) {
    self.cards.clear();
    self.cards.extend_from_slice(&self.sequence[..hand_size]);
    self.cursor = hand_size;
  }

  fn require(&self, count: usize) -> Result<(), Error> {
    if self.sequence.len() < count {
      return Err(Error::InsufficientDeckSize {
        required: count,
        available: self.sequence.len(),
      });
    }
    Ok(())
  }

  fn require_deck(deck: &ExpandedDeck, count: usize) -> Result<(), Error> {
    if deck.len() < count {
      return Err(Error::InsufficientDeckSize {
        required: count,
        available: deck.len(),
      });
    }
    Ok(())
  }
}
