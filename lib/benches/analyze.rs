#[macro_use]
extern crate criterion;

use criterion::Criterion;
use handsim::card::CardDefinition;
use handsim::deck::{DeckDefinition, DeckEntry};
use handsim::stats::analyze;

fn spell(name: &str, type_line: &str, mana_cost: &str) -> CardDefinition {
  let mut card = CardDefinition::new(name, type_line);
  card.mana_cost = mana_cost.to_string();
  card
}

fn criterion_function(c: &mut Criterion) {
  let mut definition = DeckDefinition::new();
  definition
    .mainboard
    .push(DeckEntry::new(CardDefinition::new("Mountain", "Basic Land — Mountain"), 12));
  definition
    .mainboard
    .push(DeckEntry::new(CardDefinition::new("Island", "Basic Land — Island"), 12));
  definition.mainboard.push(DeckEntry::new(
    spell("Goblin Electromancer", "Creature — Goblin Wizard", "{U}{R}"),
    12,
  ));
  definition.mainboard.push(DeckEntry::new(
    spell("Expansion // Explosion", "Instant", "{U/R}{U/R}"),
    12,
  ));
  definition
    .mainboard
    .push(DeckEntry::new(spell("Crackling Drake", "Creature — Drake", "{U}{U}{R}{R}"), 12));
  let deck = definition.expand().expect("Bad deck");
  c.bench_function("analyze 60 cards", move |b| b.iter(|| analyze(deck.iter())));
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
