#[cfg(test)]
mod tests {
    use crate::commands::OverlayCommand;
    use crate::enums::*;
    use crate::events::OverlayEvent;
    use crate::state::{format_yards, OverlaySnapshot, YardageView};
    use crate::types::*;

    #[test]
    fn test_norm_point_clamps_on_construction() {
        let p = NormPoint::new(1.4, -0.2);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 0.0);

        let inside = NormPoint::new(0.25, 0.75);
        assert_eq!(inside, NormPoint { x: 0.25, y: 0.75 });
    }

    #[test]
    fn test_norm_point_nan_handling() {
        assert!(NormPoint::try_new(f64::NAN, 0.5).is_none());
        let centered = NormPoint::new(f64::NAN, f64::INFINITY);
        assert_eq!(centered.x, 0.5);
        assert_eq!(centered.y, 1.0);
    }

    /// Out-of-range coordinates are sanitized on the way in from JSON.
    #[test]
    fn test_norm_point_deserialize_clamps() {
        let p: NormPoint = serde_json::from_str(r#"{"x":1.4,"y":-3.0}"#).unwrap();
        assert_eq!(p, NormPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_norm_point_lerp_and_distance() {
        let a = NormPoint::new(0.5, 0.75);
        let c = NormPoint::new(0.5, 0.25);
        assert!((a.distance_to(&c) - 0.5).abs() < 1e-12);
        let mid = a.midpoint(&c);
        assert!((mid.y - 0.5).abs() < 1e-12);
        // t is clamped
        assert_eq!(a.lerp(&c, 2.0), c);
    }

    #[test]
    fn test_hole_key_format() {
        let key = HoleKey::new("Belle Glades", "Calusa", 1);
        assert_eq!(key.as_str(), "BelleGlades-Calusa-01");
        let key = HoleKey::new("Broad Stripes Golf", "Back", 12);
        assert_eq!(key.to_string(), "BroadStripesGolf-Back-12");
    }

    #[test]
    fn test_default_par_cycle() {
        assert_eq!(default_par(1), 4);
        assert_eq!(default_par(2), 3);
        assert_eq!(default_par(3), 5);
        assert_eq!(default_par(4), 4);
        assert_eq!(default_par(0), 4);

        let hole = HoleReference::with_par_or_default(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.001, 0.0),
            None,
            6,
        );
        assert_eq!(hole.par, 5);
    }

    #[test]
    fn test_render_size_validity() {
        assert!(RenderSize::new(360.0, 640.0).is_valid());
        assert!(!RenderSize::new(0.0, 640.0).is_valid());
        assert!(!RenderSize::new(f64::NAN, 640.0).is_valid());
    }

    #[test]
    fn test_overlay_command_serde() {
        let commands = vec![
            OverlayCommand::DragAnchor {
                anchor: Anchor::Green,
                point: NormPoint::new(0.4, 0.2),
            },
            OverlayCommand::SaveCalibration,
            OverlayCommand::PlaceTarget {
                point: NormPoint::new(0.5, 0.5),
            },
            OverlayCommand::DragTarget {
                point: NormPoint::new(0.6, 0.5),
            },
            OverlayCommand::TapTarget { at_ms: 1_000 },
            OverlayCommand::ClearTarget,
            OverlayCommand::SetRenderSize {
                size: RenderSize::new(360.0, 640.0),
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: OverlayCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_gps_status_serde_and_label() {
        let statuses = vec![
            GpsStatus::NotStarted,
            GpsStatus::Locked,
            GpsStatus::Unsupported,
            GpsStatus::Error("timeout".to_string()),
        ];
        for s in statuses {
            let json = serde_json::to_string(&s).unwrap();
            let back: GpsStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(s, back);
        }
        assert_eq!(
            GpsStatus::Error("denied".to_string()).label(),
            "GPS error: denied"
        );
    }

    #[test]
    fn test_format_yards_placeholder() {
        assert_eq!(format_yards(Some(412)), "412");
        assert_eq!(format_yards(None), "—");
    }

    #[test]
    fn test_snapshot_default_is_unavailable() {
        let snap = OverlaySnapshot::default();
        assert!(snap.hole_key.is_none());
        assert!(snap.live.is_none());
        assert_eq!(snap.yardages, YardageView::default());
        assert_eq!(snap.visibility, VisibilityState::Showing);
        assert_eq!(snap.target_overlay, TargetOverlay::Inactive);
    }

    #[test]
    fn test_event_serde() {
        let event = OverlayEvent::TargetAutoHidden {
            reason: AutoHideReason::PastTarget,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: OverlayEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
