//! Geographic coordinate type and spatial utilities.
//!
//! `Location` uses `f64` latitude/longitude. The simulator compares locations
//! with exact float equality and drives geohash bisection down to individual
//! bits, so the extra precision over `f32` (used elsewhere in this workspace
//! for agent positions) matters here — this mirrors the original
//! implementation, which used double-precision floats throughout.

use std::fmt;

/// Mean Earth radius in meters, per the spherical law of cosines model used
/// for all distance/bearing computations in this crate.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// A WGS-84 geographic coordinate with its precomputed geohash.
///
/// Equality is exact float equality on `lat`/`lon` (the geohash is derived,
/// not compared).
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub geohash: [u8; 12],
    pub geohash_len: u8,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

impl Location {
    /// Construct a `Location`, computing its geohash at `precision` characters.
    ///
    /// `precision` must be `<= 12`; the geohash is stored inline (no heap
    /// allocation) since every `Location` in the simulation uses the same
    /// configured precision.
    pub fn new(lat: f64, lon: f64, precision: u8) -> Self {
        let hash = geohash_encode(lat, lon, precision);
        let mut geohash = [0u8; 12];
        geohash[..hash.len()].copy_from_slice(hash.as_bytes());
        Self { lat, lon, geohash, geohash_len: hash.len() as u8 }
    }

    /// Construct an "unplaced" location (auto-created road-network vertex
    /// whose real lat/lon has not yet been loaded). See §9 of `SPEC_FULL.md`
    /// for the auto-vertex-creation contract.
    pub fn unplaced() -> Self {
        Self { lat: f64::NAN, lon: f64::NAN, geohash: [0u8; 12], geohash_len: 0 }
    }

    pub fn is_unplaced(&self) -> bool {
        self.lat.is_nan() || self.lon.is_nan()
    }

    pub fn geohash_str(&self) -> &str {
        std::str::from_utf8(&self.geohash[..self.geohash_len as usize]).unwrap()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Encode `(lat, lon)` into a geohash string of `precision` base-32 characters.
///
/// Bits are interleaved longitude-first: odd bit positions bisect longitude,
/// even bit positions bisect latitude. This is the standard geohash scheme.
pub fn geohash_encode(lat: f64, lon: f64, precision: u8) -> String {
    let mut lat_interval = [-90.0_f64, 90.0];
    let mut lon_interval = [-180.0_f64, 180.0];

    let length = precision as u32 * 5;
    let mut geohash = String::with_capacity(precision as usize);
    let mut bits: u32 = 0;

    for i in 1..=length {
        if i % 2 != 0 {
            // odd: longitude
            let mid = (lon_interval[0] + lon_interval[1]) / 2.0;
            if lon > mid {
                bits = bits * 2 + 1;
                lon_interval[0] = mid;
            } else {
                bits *= 2;
                lon_interval[1] = mid;
            }
        } else {
            // even: latitude
            let mid = (lat_interval[0] + lat_interval[1]) / 2.0;
            if lat > mid {
                bits = bits * 2 + 1;
                lat_interval[0] = mid;
            } else {
                bits *= 2;
                lat_interval[1] = mid;
            }
        }
        if i % 5 == 0 {
            geohash.push(BASE32[bits as usize] as char);
            bits = 0;
        }
    }
    geohash
}

/// Decode a geohash string into the `(lat, lon)` center of its cell.
pub fn geohash_decode(geohash: &str) -> (f64, f64) {
    let mut lat_interval = [-90.0_f64, 90.0];
    let mut lon_interval = [-180.0_f64, 180.0];
    let mut odd = true; // odd bit positions bisect longitude, matching geohash_encode

    for ch in geohash.bytes() {
        let idx = BASE32.iter().position(|&b| b == ch).expect("invalid geohash character");
        for j in (0..5).rev() {
            let bit = (idx >> j) & 1;
            if odd {
                let mid = (lon_interval[0] + lon_interval[1]) / 2.0;
                if bit == 1 {
                    lon_interval[0] = mid;
                } else {
                    lon_interval[1] = mid;
                }
            } else {
                let mid = (lat_interval[0] + lat_interval[1]) / 2.0;
                if bit == 1 {
                    lat_interval[0] = mid;
                } else {
                    lat_interval[1] = mid;
                }
            }
            odd = !odd;
        }
    }

    let lat = (lat_interval[0] + lat_interval[1]) / 2.0;
    let lon = (lon_interval[0] + lon_interval[1]) / 2.0;
    (lat, lon)
}

/// Great-circle distance in meters via the spherical law of cosines.
///
/// The cosine argument is clamped to `[-1, 1]` to guard against values that
/// drift just outside that range from floating-point rounding when `a == b`.
pub fn great_circle_distance(a: Location, b: Location) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());

    let cos_arg = lat1.cos() * lat2.cos() * (lon1 - lon2).cos() + lat1.sin() * lat2.sin();
    let cos_arg = cos_arg.clamp(-1.0, 1.0);

    EARTH_RADIUS_M * cos_arg.acos()
}

/// Initial bearing in radians from `a` to `b`.
pub fn bearing(a: Location, b: Location) -> f64 {
    let (lat_a, lon_a) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat_b, lon_b) = (b.lat.to_radians(), b.lon.to_radians());

    let d_lon = lon_b - lon_a;
    let y = lat_b.cos() * d_lon.sin();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * d_lon.cos();
    y.atan2(x)
}

/// Destination point given a starting location, bearing (radians), and
/// distance (meters), using the standard spherical forward formula.
///
/// `precision` is the geohash precision to stamp on the result — callers on
/// the taxi motion hot path must pass the simulation's configured precision
/// so the returned `Location`'s geohash stays comparable to every other
/// `Location` in the system.
pub fn destination(start: Location, bearing_rad: f64, distance_m: f64, precision: u8) -> Location {
    let lat_start = start.lat.to_radians();
    let lon_start = start.lon.to_radians();
    let ad = distance_m / EARTH_RADIUS_M; // angular distance

    let lat = (lat_start.sin() * ad.cos() + lat_start.cos() * ad.sin() * bearing_rad.cos()).asin();
    let lon = lon_start
        + (bearing_rad.sin() * ad.sin() * lat_start.cos())
            .atan2(ad.cos() - lat_start.sin() * lat.sin());

    Location::new(lat.to_degrees(), lon.to_degrees(), precision)
}
