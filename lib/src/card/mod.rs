#[macro_use]
mod card;
mod color_count;
mod mana_cost;

pub use card::*;
pub use color_count::*;
pub use mana_cost::*;
