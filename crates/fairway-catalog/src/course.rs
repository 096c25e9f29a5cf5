//! Clubs, nines and holes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fairway_core::types::{GeoPoint, HoleKey, HoleReference};

const BUILTIN_COURSES: &str = include_str!("../assets/courses.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("course catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown club: {0}")]
    UnknownClub(String),
    #[error("club {club} has no nine named {nine}")]
    UnknownNine { club: String, nine: String },
    #[error("nine {nine} has no hole {hole}")]
    UnknownHole { nine: String, hole: u32 },
    #[error("invalid round: {0}")]
    InvalidRound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    Executive,
    Championship,
}

/// One hole as listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleEntry {
    /// Hole number within its nine, 1..=9.
    pub hole: u32,
    #[serde(default)]
    pub par: Option<u8>,
    /// Handicap (stroke index).
    #[serde(default)]
    pub hcp: Option<u8>,
    pub tee: GeoPoint,
    pub green: GeoPoint,
}

impl HoleEntry {
    /// Geodetic reference, with the default par when none is listed.
    pub fn reference(&self) -> HoleReference {
        HoleReference::with_par_or_default(self.tee, self.green, self.par, self.hole)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nine {
    pub name: String,
    pub holes: Vec<HoleEntry>,
}

impl Nine {
    pub fn hole(&self, number: u32) -> Result<&HoleEntry, CatalogError> {
        self.holes
            .iter()
            .find(|h| h.hole == number)
            .ok_or_else(|| CatalogError::UnknownHole {
                nine: self.name.clone(),
                hole: number,
            })
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.reference().par)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    /// Short name used for lookups, hole keys and image folders.
    pub key: String,
    /// Full display name.
    pub name: String,
    pub course_type: CourseType,
    pub nines: Vec<Nine>,
}

impl Club {
    pub fn nine(&self, name: &str) -> Result<&Nine, CatalogError> {
        self.nines
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| CatalogError::UnknownNine {
                club: self.key.clone(),
                nine: name.to_string(),
            })
    }

    pub fn nine_names(&self) -> impl Iterator<Item = &str> {
        self.nines.iter().map(|n| n.name.as_str())
    }

    pub fn hole_key(&self, nine: &str, hole: u32) -> HoleKey {
        HoleKey::new(&self.key, nine, hole)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub clubs: Vec<Club>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_COURSES)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn club(&self, key: &str) -> Result<&Club, CatalogError> {
        self.clubs
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| CatalogError::UnknownClub(key.to_string()))
    }

    pub fn clubs_of_type(&self, course_type: CourseType) -> impl Iterator<Item = &Club> {
        self.clubs.iter().filter(move |c| c.course_type == course_type)
    }

    pub fn club_keys(&self) -> impl Iterator<Item = &str> {
        self.clubs.iter().map(|c| c.key.as_str())
    }
}

/// Diagram image for a hole: `/GolfCourses/<ClubWithoutSpaces>/<Nine>/holeHH.webp`.
pub fn image_path(club_key: &str, nine: &str, hole: u32) -> String {
    let club: String = club_key.split_whitespace().collect();
    format!("/GolfCourses/{club}/{nine}/hole{hole:02}.webp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path() {
        assert_eq!(
            image_path("Orange Blossom", "Back", 7),
            "/GolfCourses/OrangeBlossom/Back/hole07.webp"
        );
    }

    #[test]
    fn test_missing_par_uses_default() {
        let json = r#"{ "hole": 2, "tee": { "lat": 28.0, "lon": -81.0 }, "green": { "lat": 28.001, "lon": -81.0 } }"#;
        let entry: HoleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.par, None);
        assert_eq!(entry.reference().par, 3);
    }

    #[test]
    fn test_lookup_errors() {
        let catalog = Catalog::builtin().unwrap();
        assert!(matches!(catalog.club("Augusta"), Err(CatalogError::UnknownClub(_))));

        let club = catalog.club("Belle Glades").unwrap();
        assert!(matches!(club.nine("Front"), Err(CatalogError::UnknownNine { .. })));
        let nine = club.nine("Calusa").unwrap();
        assert!(matches!(nine.hole(10), Err(CatalogError::UnknownHole { hole: 10, .. })));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(Catalog::from_json("{\"clubs\": 3}"), Err(CatalogError::Parse(_))));
    }
}
