//! # Errors
//!
//! Every error is recoverable and is returned by the operation that caused it.
//! An operation that returns an error leaves the session unchanged.
use crate::card::InstanceId;
use crate::zone::ZoneId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  /// A hand was requested from a deck with too few cards
  #[error("deck has {available} cards, {required} are needed")]
  InsufficientDeckSize { required: usize, available: usize },
  /// Every card in the shuffled deck has been drawn
  #[error("no cards left to draw")]
  DeckExhausted,
  /// The card type is not accepted by the zone
  #[error("{zone} does not accept {instance}")]
  InvalidDropTarget { instance: InstanceId, zone: ZoneId },
  /// The deck definition is malformed
  #[error("invalid deck data: {0}")]
  InvalidDeckData(String),
  /// The deck collaborator could not provide the deck
  #[error("failed to load deck: {0}")]
  DeckLoadFailure(String),
  /// An opening hand was requested after cards were already drawn
  #[error("a hand has already been drawn, reset or mulligan first")]
  HandAlreadyDrawn,
  #[error("no deck loaded")]
  NoDeckLoaded,
}

impl From<serde_json::Error> for Error {
  fn from(error: serde_json::Error) -> Self {
    Self::DeckLoadFailure(error.to_string())
  }
}

impl From<std::io::Error> for Error {
  fn from(error: std::io::Error) -> Self {
    Self::DeckLoadFailure(error.to_string())
  }
}
