//! Unit tests for rc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Coordinate, CoordinateError};

    #[test]
    fn zero_distance() {
        let p = Coordinate::new(7.419758, 43.731142);
        assert!(p.distance_m(p) < 0.001);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = Coordinate::new(7.0, 43.0);
        let b = Coordinate::new(7.0, 44.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn monaco_waypoints_distance() {
        // The two Monaco waypoints are ~630 m apart as the crow flies.
        let a = Coordinate::new(7.419758, 43.731142);
        let b = Coordinate::new(7.419505, 43.736825);
        let d = a.distance_m(b);
        assert!((600.0..660.0).contains(&d), "got {d}");
    }

    #[test]
    fn longitude_comes_first() {
        let c: Coordinate = (7.4, 43.7).into();
        assert_eq!(c.lon, 7.4);
        assert_eq!(c.lat, 43.7);
    }

    #[test]
    fn validate_ranges() {
        assert!(Coordinate::new(180.0, -90.0).validate().is_ok());
        assert_eq!(
            Coordinate::new(180.5, 0.0).validate(),
            Err(CoordinateError::LongitudeOutOfRange(180.5))
        );
        assert_eq!(
            Coordinate::new(0.0, 91.0).validate(),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        // Swapped order is caught when the latitude slot is out of range.
        assert!(Coordinate::new(43.7, 97.4).validate().is_err());
    }

    #[test]
    fn validate_non_finite() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0).validate(),
            Err(CoordinateError::NonFinite { .. })
        ));
        assert!(matches!(
            Coordinate::new(0.0, f64::INFINITY).validate(),
            Err(CoordinateError::NonFinite { .. })
        ));
    }
}

#[cfg(test)]
mod rng {
    use crate::{BBox, Coordinate, SeededRng};

    fn monaco() -> BBox {
        BBox::new(Coordinate::new(7.413194, 43.731056), Coordinate::new(7.421639, 43.735440))
    }

    #[test]
    fn samples_stay_inside_bbox() {
        let mut rng = SeededRng::new(42);
        for c in rng.coordinates_in(&monaco(), 200) {
            assert!((7.413194..=7.421639).contains(&c.lon), "{c} escaped the bbox");
            assert!((43.731056..=43.735440).contains(&c.lat), "{c} escaped the bbox");
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let a = SeededRng::new(7).coordinates_in(&monaco(), 10);
        let b = SeededRng::new(7).coordinates_in(&monaco(), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn seeds_diverge() {
        let a = SeededRng::new(0).coordinates_in(&monaco(), 5);
        let b = SeededRng::new(1).coordinates_in(&monaco(), 5);
        assert_ne!(a, b);
    }
}
