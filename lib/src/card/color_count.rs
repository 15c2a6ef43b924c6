use crate::card::ManaColor;
use std::collections::BTreeSet;

/// ColorCount counts cards by color identity.
/// A card with several colors counts once toward each of them
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCount {
  pub total: usize, // total number of cards counted
  pub w: usize,
  pub u: usize,
  pub b: usize,
  pub r: usize,
  pub g: usize,
  pub c: usize, // colorless identity
  pub multicolored: usize,
}

impl ColorCount {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn count(&mut self, identity: &BTreeSet<ManaColor>) {
    self.total += 1;
    let colors = identity
      .iter()
      .filter(|c| **c != ManaColor::Colorless)
      .count();
    if colors == 0 {
      self.c += 1;
      return;
    }
    if colors > 1 {
      self.multicolored += 1;
    }
    for color in identity {
      match color {
        ManaColor::White => self.w += 1,
        ManaColor::Blue => self.u += 1,
        ManaColor::Black => self.b += 1,
        ManaColor::Red => self.r += 1,
        ManaColor::Green => self.g += 1,
        ManaColor::Colorless => {}
      }
    }
  }

  /// Returns the count for a single color
  pub fn get(&self, color: ManaColor) -> usize {
    match color {
      ManaColor::White => self.w,
      ManaColor::Blue => self.u,
      ManaColor::Black => self.b,
      ManaColor::Red => self.r,
      ManaColor::Green => self.g,
      ManaColor::Colorless => self.c,
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::card::*;
  use std::collections::BTreeSet;

  #[test]
  fn empty_identity_is_colorless() {
    let mut count = ColorCount::new();
    count.count(&BTreeSet::new());
    assert_eq!(count.total, 1);
    assert_eq!(count.c, 1);
    assert_eq!(count.multicolored, 0);
  }

  #[test]
  fn multicolored_identity() {
    let mut count = ColorCount::new();
    let identity: BTreeSet<_> = vec![ManaColor::Blue, ManaColor::Red].into_iter().collect();
    count.count(&identity);
    assert_eq!(count.get(ManaColor::Blue), 1);
    assert_eq!(count.get(ManaColor::Red), 1);
    assert_eq!(count.get(ManaColor::Colorless), 0);
    assert_eq!(count.multicolored, 1);
  }
}
