//! Unit tests for tdsim-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, TaxiId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = TaxiId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(TaxiId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VertexId(0) < VertexId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VertexId::INVALID.0, u32::MAX);
        assert_eq!(TaxiId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(TaxiId(7).to_string(), "TaxiId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{bearing, destination, geohash_decode, geohash_encode, great_circle_distance, Location};

    #[test]
    fn zero_distance() {
        let p = Location::new(39.564540, 115.739662, 5);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn symmetry() {
        let a = Location::new(39.564540, 115.739662, 5);
        let b = Location::new(39.533867, 115.746735, 5);
        assert_eq!(great_circle_distance(a, b), great_circle_distance(b, a));
    }

    // Grounded on location.py's doctest example.
    #[test]
    fn matches_original_distance_example() {
        let a = Location::new(39.564540, 115.739662, 5);
        let c = Location::new(39.533867, 115.746735, 5);
        let d = great_circle_distance(a, c);
        assert!((d - 3464.17661119).abs() < 0.01, "got {d}");
    }

    #[test]
    fn geohash_matches_original_example() {
        let hash = geohash_encode(39.564540, 115.739662, 5);
        assert_eq!(hash, "wx431");
    }

    #[test]
    fn geohash_roundtrip_within_cell() {
        let lat = 39.564540;
        let lon = 115.739662;
        let hash = geohash_encode(lat, lon, 6);
        let (dlat, dlon) = geohash_decode(&hash);
        // A 6-character cell is roughly 1.2km x 0.6km; the decoded center
        // must be within half that diagonal of the original point.
        let decoded = Location::new(dlat, dlon, 6);
        let original = Location::new(lat, lon, 6);
        let d = great_circle_distance(decoded, original);
        assert!(d < 1000.0, "got {d}");
    }

    #[test]
    fn destination_inverts_bearing_and_distance() {
        let a = Location::new(39.564540, 115.739662, 5);
        let b = Location::new(39.533867, 115.746735, 5);
        let theta = bearing(a, b);
        let d = great_circle_distance(a, b);
        let back = destination(a, theta, d, 5);
        let err = great_circle_distance(back, b);
        assert!(err < 10.0, "got {err}");
    }

    #[test]
    fn unplaced_is_nan() {
        let loc = Location::unplaced();
        assert!(loc.is_unplaced());
    }
}

#[cfg(test)]
mod config {
    use crate::SimConfig;

    #[test]
    fn defaults_match_spec() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.num_taxi, 2980);
        assert_eq!(cfg.patience_s, 300);
        assert_eq!(cfg.sim_start, 9 * 3600);
        assert_eq!(cfg.sim_end, 9 * 3600 + 1800);
    }
}
