#[cfg(test)]
mod tests {
    use fairway_core::types::HoleKey;

    use crate::course::{Catalog, CatalogError, Club, CourseType, Nine};
    use crate::round::{build_round, RoundMode, RoundSelection};

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = catalog();
        let keys: Vec<&str> = catalog.club_keys().collect();
        assert_eq!(keys, vec!["Belle Glades", "Orange Blossom", "Broad Stripes Golf"]);

        let belle = catalog.club("Belle Glades").unwrap();
        assert_eq!(belle.name, "Belle Glades Country Club");
        assert_eq!(belle.nine_names().collect::<Vec<_>>(), vec!["Calusa", "Seminole", "Tequesta"]);
        for nine in &belle.nines {
            assert_eq!(nine.holes.len(), 9);
        }

        let h1 = belle.nine("Calusa").unwrap().hole(1).unwrap();
        assert_eq!(h1.par, Some(5));
        assert!((h1.tee.lat - 28.844444).abs() < 1e-9);
        assert_eq!(catalog.clubs_of_type(CourseType::Championship).count(), 3);
        assert_eq!(catalog.clubs_of_type(CourseType::Executive).count(), 0);
    }

    #[test]
    fn test_handicaps_present_where_listed() {
        let catalog = catalog();
        let back = catalog.club("Broad Stripes Golf").unwrap().nine("Back").unwrap();
        assert_eq!(back.hole(5).unwrap().hcp, Some(18));
        let calusa = catalog.club("Belle Glades").unwrap().nine("Calusa").unwrap();
        assert!(calusa.holes.iter().all(|h| h.hcp.is_none()));
    }

    #[test]
    fn test_nine_hole_round() {
        let catalog = catalog();
        let club = catalog.club("Belle Glades").unwrap();
        let round = build_round(club, &RoundSelection::nine("Seminole")).unwrap();
        assert_eq!(round.len(), 9);
        let first = round.current().unwrap();
        assert_eq!(first.display_hole, 1);
        assert_eq!(first.key(), HoleKey::from_raw("BelleGlades-Seminole-01"));
        assert_eq!(round.total_par(), club.nine("Seminole").unwrap().total_par());
    }

    #[test]
    fn test_eighteen_hole_round() {
        let catalog = catalog();
        let club = catalog.club("Orange Blossom").unwrap();
        let mut round = build_round(club, &RoundSelection::eighteen("Front", "Back")).unwrap();
        assert_eq!(round.len(), 18);

        let tenth = round.go_to(10).unwrap().clone();
        assert_eq!(tenth.nine, "Back");
        assert_eq!(tenth.entry.hole, 1);
        assert_eq!(tenth.key().as_str(), "OrangeBlossom-Back-01");
        assert_eq!(tenth.image_path(), "/GolfCourses/OrangeBlossom/Back/hole01.webp");
        assert_eq!(tenth.reference().par, 4);
    }

    #[test]
    fn test_invalid_selections() {
        let catalog = catalog();
        let club = catalog.club("Belle Glades").unwrap();

        let same = RoundSelection::eighteen("Calusa", "Calusa");
        assert!(matches!(build_round(club, &same), Err(CatalogError::InvalidRound(_))));

        let no_back = RoundSelection {
            mode: RoundMode::Eighteen,
            front: "Calusa".into(),
            back: None,
        };
        assert!(matches!(build_round(club, &no_back), Err(CatalogError::InvalidRound(_))));

        let unknown = RoundSelection::nine("Front");
        assert!(matches!(build_round(club, &unknown), Err(CatalogError::UnknownNine { .. })));

        assert!(RoundMode::from_hole_count(27).is_err());
        assert_eq!(RoundMode::from_hole_count(18).unwrap(), RoundMode::Eighteen);
    }

    #[test]
    fn test_executive_plays_first_nine() {
        let nine: Nine = catalog().club("Belle Glades").unwrap().nine("Calusa").unwrap().clone();
        let club = Club {
            key: "Pine Hollow".into(),
            name: "Pine Hollow Executive".into(),
            course_type: CourseType::Executive,
            nines: vec![nine],
        };
        let selection = RoundSelection::executive(&club).unwrap();
        assert_eq!(selection, RoundSelection::nine("Calusa"));
        let round = build_round(&club, &selection).unwrap();
        assert_eq!(round.len(), 9);
        assert_eq!(round.holes()[8].display_hole, 9);
        assert!(round.holes().iter().all(|h| h.nine == "Calusa"));

        let twice = RoundSelection::eighteen("Calusa", "Calusa");
        assert!(matches!(build_round(&club, &twice), Err(CatalogError::InvalidRound(_))));
    }

    #[test]
    fn test_navigation_clamps() {
        let catalog = catalog();
        let club = catalog.club("Belle Glades").unwrap();
        let mut round = build_round(club, &RoundSelection::nine("Calusa")).unwrap();

        assert_eq!(round.prev_hole().unwrap().display_hole, 1);
        for _ in 0..20 {
            round.next_hole();
        }
        assert_eq!(round.current().unwrap().display_hole, 9);
        assert_eq!(round.index(), 8);
        assert_eq!(round.prev_hole().unwrap().display_hole, 8);
        assert!(round.go_to(12).is_none());
        assert_eq!(round.index(), 7);
    }

    #[test]
    fn test_round_mode_serde() {
        assert_eq!(serde_json::to_string(&RoundMode::Eighteen).unwrap(), "\"18\"");
        let mode: RoundMode = serde_json::from_str("\"9\"").unwrap();
        assert_eq!(mode, RoundMode::Nine);
    }
}
