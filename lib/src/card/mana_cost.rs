use regex::Regex;

lazy_static! {
  static ref MANA_SYMBOL: Regex = Regex::new(r"\{([^{}]*)\}").expect("bad mana symbol regex");
}

/// ManaColor represents a [color](https://mtg.gamepedia.com/Color)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManaColor {
  #[serde(rename = "W")]
  White,
  #[serde(rename = "U")]
  Blue,
  #[serde(rename = "B")]
  Black,
  #[serde(rename = "R")]
  Red,
  #[serde(rename = "G")]
  Green,
  #[serde(rename = "C")]
  Colorless,
}

impl ManaColor {
  /// Returns the color for a single color letter, ignoring case
  pub fn from_symbol(symbol: &str) -> Option<Self> {
    match symbol.trim().to_uppercase().as_str() {
      "W" => Some(Self::White),
      "U" => Some(Self::Blue),
      "B" => Some(Self::Black),
      "R" => Some(Self::Red),
      "G" => Some(Self::Green),
      "C" => Some(Self::Colorless),
      _ => None,
    }
  }
}

/// ManaPips counts the mana symbols printed in a mana cost
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPips {
  pub w: usize,
  pub u: usize,
  pub b: usize,
  pub r: usize,
  pub g: usize,
  /// Generic and colorless mana, e.g. {3} counts 3 and {C} counts 1
  pub c: usize,
  pub x: usize,
}

impl ManaPips {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the pips of a mana cost string such as "{X}{2}{R}{R}".
  /// Hybrid and phyrexian symbols are not pips of a single color and are skipped
  pub fn from_mana_cost(mana_cost: &str) -> Self {
    let mut pips = Self::new();
    for symbol in mana_symbols(mana_cost) {
      if let Ok(n) = symbol.parse::<usize>() {
        pips.c += n;
        continue;
      }
      match symbol {
        "W" => pips.w += 1,
        "U" => pips.u += 1,
        "B" => pips.b += 1,
        "R" => pips.r += 1,
        "G" => pips.g += 1,
        "C" => pips.c += 1,
        "X" => pips.x += 1,
        _ => {}
      }
    }
    pips
  }

  /// Adds the counts of `other` into self
  pub fn add(&mut self, other: &ManaPips) {
    self.w += other.w;
    self.u += other.u;
    self.b += other.b;
    self.r += other.r;
    self.g += other.g;
    self.c += other.c;
    self.x += other.x;
  }

  /// Returns the number of colored pips
  #[inline]
  pub fn colored(&self) -> usize {
    self.w + self.u + self.b + self.r + self.g
  }
}

/// Returns an iterator over the contents of each `{...}` symbol in a mana cost
pub fn mana_symbols<'a>(mana_cost: &'a str) -> impl Iterator<Item = &'a str> + 'a {
  MANA_SYMBOL
    .captures_iter(mana_cost)
    .filter_map(|cap| cap.get(1))
    .map(|m| m.as_str().trim())
}

/// Returns the mana value of a mana cost string.
/// Numbers count their value, X counts 0, and every other symbol counts 1,
/// except twobrid symbols like {2/W} which count 2
pub fn mana_value_from_str(mana_cost: &str) -> f64 {
  mana_symbols(mana_cost)
    .map(|symbol| {
      if let Ok(n) = symbol.parse::<f64>() {
        return n;
      }
      match symbol {
        "X" | "Y" | "Z" => 0.0,
        s if s.contains('/') => s
          .split('/')
          .filter_map(|part| part.parse::<f64>().ok())
          .fold(1.0, f64::max),
        _ => 1.0,
      }
    })
    .sum()
}
