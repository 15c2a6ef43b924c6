//! # Drag session
//!
//! A drag runs `start`, any number of `over`/`leave`, then `end` and `drop` in either
//! order. `end` only marks the drag inactive; the payload survives until a drop
//! consumes it, so a drop that arrives after `end` still moves the card.
use crate::card::CardInstance;
use crate::zone::ZoneId;

/// DragSession is the single in-flight card move
#[derive(Debug, Clone, PartialEq)]
pub enum DragSession {
  Idle,
  Dragging {
    instance: CardInstance,
    source: ZoneId,
    /// The zone under the pointer, set only when it accepts the card
    candidate: Option<ZoneId>,
  },
  /// The drag ended but no drop has consumed the payload yet
  PendingDrop {
    instance: CardInstance,
    source: ZoneId,
  },
}

impl Default for DragSession {
  fn default() -> Self {
    Self::Idle
  }
}

impl DragSession {
  pub fn new() -> Self {
    Self::Idle
  }

  /// Starts dragging `instance`, abandoning any drag already in flight
  pub fn start(&mut self, instance: CardInstance, source: ZoneId) {
    if let Some(previous) = self.instance() {
      debug!("Abandoning drag of {}", previous.id);
    }
    *self = Self::Dragging {
      instance,
      source,
      candidate: None,
    };
  }

  /// Records `target` as the drop candidate if it accepts the dragged card.
  /// Returns false, leaving no candidate, when there is no active drag or the
  /// target rejects the card
  pub fn over(&mut self, target: ZoneId) -> bool {
    match self {
      Self::Dragging {
        instance,
        candidate,
        ..
      } => {
        let valid = target.accepts(&instance.definition);
        *candidate = if valid { Some(target) } else { None };
        valid
      }
      _ => false,
    }
  }

  /// Clears the drop candidate without ending the drag
  pub fn leave(&mut self) {
    if let Self::Dragging { candidate, .. } = self {
      *candidate = None;
    }
  }

  /// Marks the drag inactive while keeping its payload for a later drop
  pub fn end(&mut self) {
    *self = match std::mem::take(self) {
      Self::Dragging {
        instance, source, ..
      } => Self::PendingDrop { instance, source },
      other => other,
    };
  }

  /// Takes the payload and returns the session to `Idle`
  pub fn take(&mut self) -> Option<(CardInstance, ZoneId)> {
    match std::mem::take(self) {
      Self::Idle => None,
      Self::Dragging {
        instance, source, ..
      }
      | Self::PendingDrop { instance, source } => Some((instance, source)),
    }
  }

  pub fn clear(&mut self) {
    *self = Self::Idle;
  }

  /// Returns true while the pointer is still dragging
  #[inline]
  pub fn is_active(&self) -> bool {
    matches!(self, Self::Dragging { .. })
  }

  #[inline]
  pub fn is_idle(&self) -> bool {
    matches!(self, Self::Idle)
  }

  /// Returns the dragged card, whether or not the drag is still active
  pub fn instance(&self) -> Option<&CardInstance> {
    match self {
      Self::Idle => None,
      Self::Dragging { instance, .. } | Self::PendingDrop { instance, .. } => Some(instance),
    }
  }

  pub fn source(&self) -> Option<ZoneId> {
    match self {
      Self::Idle => None,
      Self::Dragging { source, .. } | Self::PendingDrop { source, .. } => Some(*source),
    }
  }

  pub fn candidate(&self) -> Option<ZoneId> {
    match self {
      Self::Dragging { candidate, .. } => *candidate,
      _ => None,
    }
  }
}
