//! Rounds: an ordered list of holes drawn from one or two nines.

use serde::{Deserialize, Serialize};
use tracing::debug;

use fairway_core::types::{HoleKey, HoleReference};

use crate::course::{image_path, CatalogError, Club, HoleEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundMode {
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "18")]
    Eighteen,
}

impl RoundMode {
    pub fn from_hole_count(holes: u32) -> Result<Self, CatalogError> {
        match holes {
            9 => Ok(RoundMode::Nine),
            18 => Ok(RoundMode::Eighteen),
            n => Err(CatalogError::InvalidRound(format!("a round is 9 or 18 holes, not {n}"))),
        }
    }
}

/// Which nines to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSelection {
    pub mode: RoundMode,
    pub front: String,
    /// Required for 18 holes.
    pub back: Option<String>,
}

impl RoundSelection {
    pub fn nine(front: impl Into<String>) -> Self {
        Self {
            mode: RoundMode::Nine,
            front: front.into(),
            back: None,
        }
    }

    pub fn eighteen(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            mode: RoundMode::Eighteen,
            front: front.into(),
            back: Some(back.into()),
        }
    }

    /// Executive courses play their first nine only.
    pub fn executive(club: &Club) -> Result<Self, CatalogError> {
        let first = club
            .nines
            .first()
            .ok_or_else(|| CatalogError::InvalidRound(format!("{} has no nines", club.key)))?;
        Ok(Self::nine(first.name.clone()))
    }
}

/// One hole of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundHole {
    /// Number shown to the player: 1..=9 on the front, 10..=18 on the back.
    pub display_hole: u32,
    pub club_key: String,
    pub nine: String,
    pub entry: HoleEntry,
}

impl RoundHole {
    pub fn key(&self) -> HoleKey {
        HoleKey::new(&self.club_key, &self.nine, self.entry.hole)
    }

    pub fn reference(&self) -> HoleReference {
        self.entry.reference()
    }

    pub fn image_path(&self) -> String {
        image_path(&self.club_key, &self.nine, self.entry.hole)
    }
}

/// Build the hole list for a round at `club`.
///
/// The back nine keeps its own hole numbers (for keys and images) and is
/// displayed as 10..=18. An 18-hole round needs two different nines.
pub fn build_round(club: &Club, selection: &RoundSelection) -> Result<Round, CatalogError> {
    let front = club.nine(&selection.front)?;
    let mut holes: Vec<RoundHole> = front
        .holes
        .iter()
        .map(|entry| RoundHole {
            display_hole: entry.hole,
            club_key: club.key.clone(),
            nine: front.name.clone(),
            entry: *entry,
        })
        .collect();

    if selection.mode == RoundMode::Eighteen {
        let back_name = selection
            .back
            .as_deref()
            .ok_or_else(|| CatalogError::InvalidRound("18 holes needs a back nine".into()))?;
        if back_name == front.name {
            return Err(CatalogError::InvalidRound(format!(
                "front and back nine are both {back_name}"
            )));
        }
        let back = club.nine(back_name)?;
        holes.extend(back.holes.iter().map(|entry| RoundHole {
            display_hole: entry.hole + 9,
            club_key: club.key.clone(),
            nine: back.name.clone(),
            entry: *entry,
        }));
    }

    debug!(club = %club.key, holes = holes.len(), "built round");
    Ok(Round::new(holes))
}

/// Holes of a round with a cursor. Navigation clamps at both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    holes: Vec<RoundHole>,
    index: usize,
}

impl Round {
    pub fn new(holes: Vec<RoundHole>) -> Self {
        Self { holes, index: 0 }
    }

    pub fn holes(&self) -> &[RoundHole] {
        &self.holes
    }

    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&RoundHole> {
        self.holes.get(self.index)
    }

    pub fn next_hole(&mut self) -> Option<&RoundHole> {
        self.index = (self.index + 1).min(self.holes.len().saturating_sub(1));
        self.current()
    }

    pub fn prev_hole(&mut self) -> Option<&RoundHole> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    /// Jump to a display hole number.
    pub fn go_to(&mut self, display_hole: u32) -> Option<&RoundHole> {
        let index = self.holes.iter().position(|h| h.display_hole == display_hole)?;
        self.index = index;
        self.current()
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.reference().par)).sum()
    }
}
