extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
extern crate handsim;

use handsim::card::CardInstance;
use handsim::hand::KeepRecord;
use handsim::session::{Session, SessionConfig};
use handsim::stats::Statistics;
use handsim::store::{DeckStore, DirectoryStore};
use std::env;

#[derive(Debug)]
enum Error {
  Json(serde_json::Error),
  Handsim(handsim::Error),
  Usage(String),
}

impl From<serde_json::Error> for Error {
  fn from(error: serde_json::Error) -> Self {
    Self::Json(error)
  }
}

impl From<handsim::Error> for Error {
  fn from(error: handsim::Error) -> Self {
    Self::Handsim(error)
  }
}

#[derive(Debug, Serialize)]
struct Output<'a> {
  deck: &'a str,
  mulligans: usize,
  hand: &'a [CardInstance],
  keep: &'a KeepRecord,
  deck_statistics: Statistics,
  hand_statistics: Statistics,
}

/// Usage: handsim_cli <deck dir> <deck name> [mulligans] [seed]
///
/// Deals an opening hand from the named deck, takes the requested number of
/// mulligans, keeps, and prints the hand with deck and hand statistics as JSON.
/// With only a deck dir, lists the decks found there.
fn main() -> Result<(), Error> {
  let _ = env_logger::try_init();
  let args: Vec<String> = env::args().collect();
  let dir = args
    .get(1)
    .ok_or_else(|| Error::Usage("Expected a deck directory".to_string()))?;
  let mut store = DirectoryStore::open(dir)?;
  let name = match args.get(2) {
    Some(name) => name,
    None => {
      for name in store.list()? {
        println!("{}", name);
      }
      return Ok(());
    }
  };
  let mulligans = match args.get(3) {
    Some(n) => n
      .parse::<usize>()
      .map_err(|e| Error::Usage(format!("Bad mulligan count {}: {}", n, e)))?,
    None => 0,
  };
  let seed = match args.get(4) {
    Some(s) => Some(
      s.parse::<u64>()
        .map_err(|e| Error::Usage(format!("Bad seed {}: {}", s, e)))?,
    ),
    None => None,
  };

  let mut session = Session::load(&store, name, &SessionConfig { seed })?;
  store.dispose();
  info!("Drawing opening hand from {}", name);
  session.draw_opening_hand()?;
  for _ in 0..mulligans {
    session.mulligan()?;
  }
  let keep = session.keep_hand().clone();
  let output = Output {
    deck: name,
    mulligans: session.hand().mulligan_count(),
    hand: session.hand().cards(),
    keep: &keep,
    deck_statistics: session.deck_statistics(),
    hand_statistics: session.hand_statistics(),
  };
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}
