//! # Magic: The Gathering Hand Simulation Library
//!
//! handsim is a library that shuffles a constructed deck, deals opening hands, takes
//! mulligans and draws, and lets a player drag drawn cards onto the battlefield, the
//! graveyard or exile. It also computes mana curve, type, color and pip statistics for
//! the deck, the current hand and each zone. The browser front end drives it through
//! the wasm-bindgen `Simulator`.

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate rand;
extern crate regex;
extern crate wasm_bindgen;

#[macro_use]
pub mod card;
pub mod deck;
pub mod drag;
pub mod error;
pub mod hand;
pub mod session;
pub mod shuffle;
pub mod stats;
pub mod store;
pub mod wasm;
pub mod zone;

pub use crate::deck::{DeckDefinition, DeckEntry, ExpandedDeck};
pub use crate::error::Error;
pub use crate::session::{Session, SessionConfig};
pub use crate::stats::{analyze, Statistics};
pub use crate::store::{DeckStore, DirectoryStore};
pub use crate::wasm::Simulator;
pub use crate::zone::ZoneId;
