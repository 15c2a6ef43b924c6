//! # Browser interface
//!
//! Exposes a `Simulator` to the front end through wasm-bindgen. Inputs and outputs
//! cross the boundary as serde-serialized `JsValue`s; every error is returned as a
//! rejected `JsValue` string.
//!
//! # Example
//!
//!  ```js
//!  const sim = new Simulator();
//!  sim.loadDeck(deckJson, { seed: 7 });
//!  const hand = sim.drawOpeningHand();
//!  sim.dragStart(hand[0].id, "hand");
//!  sim.dragOver("battlefield-lands");
//!  const report = sim.drop("battlefield-lands");
//!  ```
use crate::card::InstanceId;
use crate::error::Error;
use crate::session::{Session, SessionConfig};
use crate::stats::Statistics;
use crate::store::parse_deck;
use crate::zone::ZoneId;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
  JsValue::from_serde(value)
    .map_err(|e| JsValue::from_str(&format!("Error serializing output: {}", e)))
}

fn js_err(e: Error) -> JsValue {
  JsValue::from_str(&e.to_string())
}

fn zone_from_str(zone: &str) -> Result<ZoneId, JsValue> {
  zone.parse::<ZoneId>().map_err(|e| JsValue::from_str(&e))
}

/// Simulator holds at most one session. Loading a deck replaces it
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct Simulator {
  session: Option<Session>,
}

impl Simulator {
  fn session(&mut self) -> Result<&mut Session, JsValue> {
    self.session.as_mut().ok_or_else(|| js_err(Error::NoDeckLoaded))
  }

  /// Replaces the session with one for the deck in `json`.
  /// On failure the current session, if any, is left untouched
  pub fn load(&mut self, json: &str, config: &SessionConfig) -> Result<(), Error> {
    let definition = parse_deck(json)?;
    let session = Session::new(&definition, config)?;
    self.session = Some(session);
    Ok(())
  }
}

#[wasm_bindgen]
impl Simulator {
  #[wasm_bindgen(constructor)]
  pub fn new() -> Self {
    Self::default()
  }

  /// Loads a deck from its JSON text, either a bare deck or a `{ success, deck, error }`
  /// response. On failure the previous session, if any, stays loaded
  #[wasm_bindgen(js_name = loadDeck)]
  pub fn load_deck(&mut self, json: &str, config: &JsValue) -> Result<(), JsValue> {
    let config: SessionConfig = if config.is_undefined() || config.is_null() {
      SessionConfig::default()
    } else {
      config
        .into_serde()
        .map_err(|e| JsValue::from_str(&format!("Error deserializing config: {}", e)))?
    };
    self.load(json, &config).map_err(js_err)
  }

  #[wasm_bindgen(js_name = isLoaded)]
  pub fn is_loaded(&self) -> bool {
    self.session.is_some()
  }

  #[wasm_bindgen(js_name = drawOpeningHand)]
  pub fn draw_opening_hand(&mut self) -> Result<JsValue, JsValue> {
    let cards = self.session()?.draw_opening_hand().map_err(js_err)?;
    to_js(&cards)
  }

  pub fn mulligan(&mut self) -> Result<JsValue, JsValue> {
    let cards = self.session()?.mulligan().map_err(js_err)?;
    to_js(&cards)
  }

  #[wasm_bindgen(js_name = drawNextCard)]
  pub fn draw_next_card(&mut self) -> Result<JsValue, JsValue> {
    let card = self.session()?.draw_next_card().map_err(js_err)?;
    to_js(card)
  }

  #[wasm_bindgen(js_name = drawNewHand)]
  pub fn draw_new_hand(&mut self) -> Result<JsValue, JsValue> {
    let cards = self.session()?.draw_new_hand().map_err(js_err)?;
    to_js(&cards)
  }

  #[wasm_bindgen(js_name = keepHand)]
  pub fn keep_hand(&mut self) -> Result<JsValue, JsValue> {
    let record = self.session()?.keep_hand();
    to_js(record)
  }

  pub fn reset(&mut self) -> Result<(), JsValue> {
    self.session()?.reset();
    Ok(())
  }

  #[wasm_bindgen(js_name = moveCard)]
  pub fn move_card(&mut self, id: &str, source: &str, target: &str) -> Result<JsValue, JsValue> {
    let source = zone_from_str(source)?;
    let target = zone_from_str(target)?;
    let outcome = self
      .session()?
      .move_instance(&InstanceId::from(id), source, target)
      .map_err(js_err)?;
    to_js(&outcome)
  }

  #[wasm_bindgen(js_name = dragStart)]
  pub fn drag_start(&mut self, id: &str, source: &str) -> Result<bool, JsValue> {
    let source = zone_from_str(source)?;
    Ok(self.session()?.drag_start(&InstanceId::from(id), source))
  }

  #[wasm_bindgen(js_name = dragOver)]
  pub fn drag_over(&mut self, target: &str) -> Result<bool, JsValue> {
    let target = zone_from_str(target)?;
    Ok(self.session()?.drag_over(target))
  }

  #[wasm_bindgen(js_name = dragLeave)]
  pub fn drag_leave(&mut self) -> Result<(), JsValue> {
    self.session()?.drag_leave();
    Ok(())
  }

  #[wasm_bindgen(js_name = dragEnd)]
  pub fn drag_end(&mut self) -> Result<(), JsValue> {
    self.session()?.drag_end();
    Ok(())
  }

  /// Drops the dragged card on `target`, or cancels the drag when `target` is undefined
  #[wasm_bindgen(js_name = drop)]
  pub fn drop_card(&mut self, target: Option<String>) -> Result<JsValue, JsValue> {
    let target = match target {
      Some(zone) => Some(zone_from_str(&zone)?),
      None => None,
    };
    let report = self.session()?.drop_card(target).map_err(js_err)?;
    to_js(&report)
  }

  pub fn view(&mut self) -> Result<JsValue, JsValue> {
    let view = self.session()?.view();
    to_js(&view)
  }

  #[wasm_bindgen(js_name = deckStatistics)]
  pub fn deck_statistics(&mut self) -> Result<JsValue, JsValue> {
    let stats: Statistics = self.session()?.deck_statistics();
    to_js(&stats)
  }

  #[wasm_bindgen(js_name = handStatistics)]
  pub fn hand_statistics(&mut self) -> Result<JsValue, JsValue> {
    let stats = self.session()?.hand_statistics();
    to_js(&stats)
  }

  #[wasm_bindgen(js_name = zoneStatistics)]
  pub fn zone_statistics(&mut self, zone: &str) -> Result<JsValue, JsValue> {
    let zone = zone_from_str(zone)?;
    let stats = self.session()?.zone_statistics(zone);
    to_js(&stats)
  }
}
