//! # Deck persistence
//!
//! The simulator reads decks through `DeckStore`. Stores are plain values built
//! by the caller and handed to `Session::load`.
use crate::deck::DeckDefinition;
use crate::error::Error;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A source of named deck definitions
pub trait DeckStore {
  /// Returns the names of every deck available, sorted
  fn list(&self) -> Result<Vec<String>, Error>;
  /// Returns the deck named `name`
  fn load(&self, name: &str) -> Result<DeckDefinition, Error>;
}

/// LoadResponse is the envelope returned by the deck persistence service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub deck: Option<DeckDefinition>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl LoadResponse {
  pub fn into_result(self) -> Result<DeckDefinition, Error> {
    match self {
      Self {
        success: true,
        deck: Some(deck),
        ..
      } => Ok(deck),
      Self {
        success: true,
        deck: None,
        ..
      } => Err(Error::DeckLoadFailure("response has no deck".to_string())),
      Self { error, .. } => Err(Error::DeckLoadFailure(
        error.unwrap_or_else(|| "unknown error".to_string()),
      )),
    }
  }
}

/// A deck file holds either a response envelope or a bare deck
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeckFile {
  Response(LoadResponse),
  Deck(DeckDefinition),
}

/// Parses the contents of a deck file
pub fn parse_deck(json: &str) -> Result<DeckDefinition, Error> {
  match serde_json::from_str::<DeckFile>(json)? {
    DeckFile::Response(response) => response.into_result(),
    DeckFile::Deck(deck) => Ok(deck),
  }
}

/// DirectoryStore serves `<name>.json` deck files from a directory.
/// The directory is scanned once by `open`; `dispose` releases the index
#[derive(Debug, Clone)]
pub struct DirectoryStore {
  root: PathBuf,
  index: BTreeMap<String, PathBuf>,
}

impl DirectoryStore {
  pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
    let root = root.as_ref().to_path_buf();
    let mut index = BTreeMap::new();
    for entry in fs::read_dir(&root)? {
      let path = entry?.path();
      if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
        continue;
      }
      if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
        index.insert(name.to_string(), path.clone());
      }
    }
    info!("Found {} decks in {}", index.len(), root.display());
    Ok(Self { root, index })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Drops the deck index. Later loads fail until the store is reopened
  pub fn dispose(&mut self) {
    debug!("Disposing deck store @ {}", self.root.display());
    self.index.clear();
  }
}

impl DeckStore for DirectoryStore {
  fn list(&self) -> Result<Vec<String>, Error> {
    Ok(self.index.keys().cloned().collect())
  }

  fn load(&self, name: &str) -> Result<DeckDefinition, Error> {
    let path = self
      .index
      .get(name)
      .ok_or_else(|| Error::DeckLoadFailure(format!("no deck named \"{}\"", name)))?;
    info!("Loading deck @ {}", path.display());
    parse_deck(&fs::read_to_string(path)?)
  }
}

/// MemoryStore keeps decks in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  decks: BTreeMap<String, DeckDefinition>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, name: &str, deck: DeckDefinition) {
    self.decks.insert(name.to_string(), deck);
  }
}

impl DeckStore for MemoryStore {
  fn list(&self) -> Result<Vec<String>, Error> {
    Ok(self.decks.keys().cloned().collect())
  }

  fn load(&self, name: &str) -> Result<DeckDefinition, Error> {
    self
      .decks
      .get(name)
      .cloned()
      .ok_or_else(|| Error::DeckLoadFailure(format!("no deck named \"{}\"", name)))
  }
}

#[cfg(test)]
mod tests {
  use crate::error::Error;
  use crate::store::*;
  use std::time::{SystemTime, UNIX_EPOCH};

  fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .unwrap()
      .as_nanos();
    let dir = std::env::temp_dir().join(format!(
      "handsim-{}-{}-{}",
      tag,
      std::process::id(),
      nanos
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  const BARE_DECK: &str = r#"{
    "commanders": [],
    "mainboard": [{ "card": { "name": "Forest", "type_line": "Basic Land — Forest" }, "quantity": 10 }]
  }"#;

  const RESPONSE_DECK: &str = r#"{
    "success": true,
    "deck": { "mainboard": [{ "card": { "name": "Island", "type_line": "Basic Land — Island" }, "quantity": 2 }] }
  }"#;

  #[test]
  fn parse_bare_deck() {
    let deck = parse_deck(BARE_DECK).unwrap();
    assert_eq!(deck.card_count(), 10);
  }

  #[test]
  fn parse_response_deck() {
    let deck = parse_deck(RESPONSE_DECK).unwrap();
    assert_eq!(deck.mainboard[0].quantity, 2);
  }

  #[test]
  fn failed_response() {
    let err = parse_deck(r#"{ "success": false, "error": "not found" }"#).unwrap_err();
    assert_eq!(err, Error::DeckLoadFailure("not found".to_string()));
    let err = parse_deck(r#"{ "success": true }"#).unwrap_err();
    assert!(matches!(err, Error::DeckLoadFailure(_)));
  }

  #[test]
  fn malformed_json() {
    assert!(matches!(
      parse_deck("{ not json"),
      Err(Error::DeckLoadFailure(_))
    ));
  }

  #[test]
  fn directory_store() {
    let dir = scratch_dir("store");
    fs::write(dir.join("gruul.json"), BARE_DECK).unwrap();
    fs::write(dir.join("mono-blue.json"), RESPONSE_DECK).unwrap();
    fs::write(dir.join("notes.txt"), "not a deck").unwrap();
    let mut store = DirectoryStore::open(&dir).unwrap();
    assert_eq!(store.list().unwrap(), vec!["gruul", "mono-blue"]);
    assert_eq!(store.load("gruul").unwrap().card_count(), 10);
    assert_eq!(store.load("mono-blue").unwrap().card_count(), 2);
    assert!(matches!(
      store.load("notes"),
      Err(Error::DeckLoadFailure(_))
    ));
    store.dispose();
    assert!(store.list().unwrap().is_empty());
    assert!(store.load("gruul").is_err());
    fs::remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn missing_directory() {
    let dir = scratch_dir("missing").join("nope");
    assert!(matches!(
      DirectoryStore::open(&dir),
      Err(Error::DeckLoadFailure(_))
    ));
  }

  #[test]
  fn memory_store() {
    let mut store = MemoryStore::new();
    store.insert("b", parse_deck(BARE_DECK).unwrap());
    store.insert("a", parse_deck(RESPONSE_DECK).unwrap());
    assert_eq!(store.list().unwrap(), vec!["a", "b"]);
    assert!(store.load("c").is_err());
  }
}
