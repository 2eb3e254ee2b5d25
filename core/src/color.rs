use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Number of colors in the full palette. Lower levels play with a prefix of it,
/// see [`active_colors`](crate::active_colors).
pub const PALETTE_LEN: u8 = 6;

/// Logical palette slot carried by every board cell.
///
/// The engine only ever compares and copies slots; resolving a slot to a
/// display value (a CSS class, a theme variable) is strictly a renderer
/// concern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSlot(u8);

impl ColorSlot {
    pub const fn new(index: u8) -> Result<Self> {
        if index < PALETTE_LEN {
            Ok(Self(index))
        } else {
            Err(GameError::InvalidColorSlot)
        }
    }

    pub(crate) const fn new_unchecked(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_outside_the_palette_are_rejected() {
        assert!(ColorSlot::new(PALETTE_LEN - 1).is_ok());
        assert_eq!(ColorSlot::new(PALETTE_LEN), Err(GameError::InvalidColorSlot));
    }
}
