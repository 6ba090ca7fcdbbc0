//! Geohash encoding and decoding.
//!
//! A geohash interleaves longitude and latitude bisection bits, longitude
//! first, and packs every five bits into one base-32 character. Longer hashes
//! name smaller cells; the empty hash names the whole world.
//!
//! Encoding routes a value that sits exactly on a midpoint to the lower half
//! (the comparison is strictly "greater than"). Cells produced here therefore
//! own their upper edges, and hashes stay bit-compatible with existing data
//! encoded the same way.

use crate::compute::validation::{validate_coordinate, validate_precision};
use crate::error::{GeomarkError, Result};
use geomark_types::bbox::{BoundingBox, Interval};
use geomark_types::coordinate::Coordinate;

/// The geohash alphabet: digits and lowercase letters without `a`, `i`, `l`, `o`.
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Each geohash character carries five bits.
pub const BITS_PER_CHAR: usize = 5;

/// Longest geohash the codec produces, and the highest index precision.
///
/// Twelve characters name cells a few centimeters across.
pub const MAX_PRECISION: usize = 12;

const INVALID: u8 = u8::MAX;

const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < BASE32.len() {
        table[BASE32[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// The 5-bit value of a geohash character, or `None` if it is not in the alphabet.
pub fn char_value(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match DECODE_TABLE[c as usize] {
        INVALID => None,
        value => Some(value),
    }
}

/// Whether every character of `geohash` belongs to the alphabet.
pub fn is_valid(geohash: &str) -> bool {
    geohash.chars().all(|c| char_value(c).is_some())
}

/// Encode a coordinate as a geohash of `precision` characters.
///
/// # Errors
///
/// Returns [`GeomarkError::OutOfRange`] if the coordinate is non-finite or
/// outside latitude [-90, 90] / longitude [-180, 180], and
/// [`GeomarkError::InvalidInput`] if `precision` exceeds [`MAX_PRECISION`].
///
/// # Examples
///
/// ```rust
/// use geomark::{Coordinate, geohash};
///
/// let hash = geohash::encode(&Coordinate::new(42.6, -5.6), 5)?;
/// assert_eq!(hash, "ezs42");
/// assert_eq!(geohash::encode(&Coordinate::new(42.6, -5.6), 0)?, "");
/// # Ok::<(), geomark::GeomarkError>(())
/// ```
pub fn encode(coordinate: &Coordinate, precision: usize) -> Result<String> {
    validate_coordinate(coordinate)?;
    validate_precision(precision)?;

    let mut latitude = Interval::new(-90.0, 90.0);
    let mut longitude = Interval::new(-180.0, 180.0);
    let mut hash = String::with_capacity(precision);
    let mut even = true;

    for _ in 0..precision {
        let mut value = 0u8;
        for bit in (0..BITS_PER_CHAR).rev() {
            let (interval, target) = if even {
                (&mut longitude, coordinate.longitude)
            } else {
                (&mut latitude, coordinate.latitude)
            };
            let upper = target > interval.mid();
            if upper {
                value |= 1 << bit;
            }
            refine(interval, upper);
            even = !even;
        }
        hash.push(BASE32[value as usize] as char);
    }

    Ok(hash)
}

/// Decode a geohash to the center of its cell.
///
/// # Errors
///
/// Returns [`GeomarkError::InvalidCharacter`] for any character outside the alphabet.
///
/// # Examples
///
/// ```rust
/// use geomark::geohash;
///
/// let center = geohash::decode("ezs42")?;
/// assert!((center.latitude - 42.6).abs() < 0.03);
/// assert!((center.longitude + 5.6).abs() < 0.03);
///
/// assert!(geohash::decode("a").is_err());
/// # Ok::<(), geomark::GeomarkError>(())
/// ```
pub fn decode(geohash: &str) -> Result<Coordinate> {
    Ok(bounding_box(geohash)?.center())
}

/// The latitude/longitude extent of a geohash cell.
///
/// # Errors
///
/// Returns [`GeomarkError::InvalidCharacter`] for any character outside the alphabet.
///
/// # Examples
///
/// ```rust
/// use geomark::{BoundingBox, geohash};
///
/// assert_eq!(geohash::bounding_box("")?, BoundingBox::WORLD);
///
/// let cell = geohash::bounding_box("ezs42")?;
/// assert!(cell.latitude.min < 42.6 && 42.6 < cell.latitude.max);
/// # Ok::<(), geomark::GeomarkError>(())
/// ```
pub fn bounding_box(geohash: &str) -> Result<BoundingBox> {
    let mut bbox = BoundingBox::WORLD;
    let mut even = true;

    for (position, character) in geohash.chars().enumerate() {
        let value = char_value(character).ok_or(GeomarkError::InvalidCharacter {
            character,
            position,
        })?;

        for bit in (0..BITS_PER_CHAR).rev() {
            let upper = value & (1 << bit) != 0;
            if even {
                refine(&mut bbox.longitude, upper);
            } else {
                refine(&mut bbox.latitude, upper);
            }
            even = !even;
        }
    }

    Ok(bbox)
}

/// The 32 geohashes one character longer than `prefix`, in alphabet order.
pub fn children(prefix: &str) -> impl Iterator<Item = String> + '_ {
    BASE32.iter().map(move |&c| {
        let mut child = String::with_capacity(prefix.len() + 1);
        child.push_str(prefix);
        child.push(c as char);
        child
    })
}

fn refine(interval: &mut Interval, upper: bool) {
    let mid = interval.mid();
    if upper {
        interval.min = mid;
    } else {
        interval.max = mid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        let hash = encode(&Coordinate::new(42.6, -5.6), 5).unwrap();
        assert_eq!(hash, "ezs42");

        let center = decode("ezs42").unwrap();
        assert!((center.latitude - 42.6).abs() < 0.03);
        assert!((center.longitude + 5.6).abs() < 0.03);
    }

    #[test]
    fn test_zero_precision_is_world() {
        assert_eq!(encode(&Coordinate::new(12.0, 34.0), 0).unwrap(), "");
        assert_eq!(bounding_box("").unwrap(), BoundingBox::WORLD);
        assert_eq!(decode("").unwrap(), Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_midpoint_goes_to_lower_half() {
        // The origin sits on the first midpoint of both axes, so it lands in
        // the south-west quadrant and then on the upper edge of every sub-cell.
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(encode(&origin, 5).unwrap(), "7zzzz");

        let cell = bounding_box("7zzzz").unwrap();
        assert_eq!(cell.latitude.max, 0.0);
        assert_eq!(cell.longitude.max, 0.0);
        assert!(cell.contains_point(&origin));
    }

    #[test]
    fn test_world_corners() {
        assert_eq!(encode(&Coordinate::new(-90.0, -180.0), 3).unwrap(), "000");
        assert_eq!(encode(&Coordinate::new(90.0, 180.0), 3).unwrap(), "zzz");
    }

    #[test]
    fn test_invalid_character() {
        let err = decode("a").unwrap_err();
        assert!(matches!(
            err,
            GeomarkError::InvalidCharacter {
                character: 'a',
                position: 0
            }
        ));

        let err = bounding_box("ezsi2").unwrap_err();
        assert!(matches!(
            err,
            GeomarkError::InvalidCharacter {
                character: 'i',
                position: 3
            }
        ));

        assert!(decode("EZS42").is_err());
        assert!(decode("ez é").is_err());
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert!(matches!(
            encode(&Coordinate::new(91.0, 0.0), 5),
            Err(GeomarkError::OutOfRange(_))
        ));
        assert!(encode(&Coordinate::new(0.0, 180.5), 5).is_err());
        assert!(encode(&Coordinate::new(f64::NAN, 0.0), 5).is_err());
    }

    #[test]
    fn test_encode_rejects_precision_above_max() {
        let point = Coordinate::new(1.0, 1.0);
        assert_eq!(encode(&point, MAX_PRECISION).unwrap().len(), MAX_PRECISION);
        assert!(matches!(
            encode(&point, MAX_PRECISION + 1),
            Err(GeomarkError::InvalidInput(_))
        ));
        assert!(matches!(
            encode(&point, usize::MAX),
            Err(GeomarkError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_children_are_nested() {
        for prefix in ["", "e", "ezs", "7zz"] {
            let parent = bounding_box(prefix).unwrap();
            let kids: Vec<String> = children(prefix).collect();
            assert_eq!(kids.len(), 32);
            for child in kids {
                assert_eq!(child.len(), prefix.len() + 1);
                let cell = bounding_box(&child).unwrap();
                assert!(parent.contains(&cell), "{child} escapes {prefix}");
                assert!(cell.latitude.span() < parent.latitude.span());
                assert!(cell.longitude.span() < parent.longitude.span());
            }
        }
    }

    #[test]
    fn test_decoded_center_inside_cell() {
        let points = [
            Coordinate::new(37.7749, -122.4194),
            Coordinate::new(-33.8688, 151.2093),
            Coordinate::new(64.1466, -21.9426),
            Coordinate::new(-0.0001, 0.0001),
        ];

        for point in points {
            let mut previous_span = f64::INFINITY;
            for precision in 1..=10 {
                let hash = encode(&point, precision).unwrap();
                let cell = bounding_box(&hash).unwrap();
                let center = decode(&hash).unwrap();

                assert!(cell.contains_point(&point));
                assert!(cell.contains_point(&center));
                assert!((center.latitude - point.latitude).abs() <= cell.latitude.span() / 2.0);
                assert!((center.longitude - point.longitude).abs() <= cell.longitude.span() / 2.0);

                // The center-to-point distance can grow from one precision to the
                // next; only the half-span bound above holds at every step.
                let span = cell.latitude.span() + cell.longitude.span();
                assert!(span < previous_span);
                previous_span = span;
            }
        }
    }

    #[test]
    fn test_char_value() {
        assert_eq!(char_value('0'), Some(0));
        assert_eq!(char_value('b'), Some(10));
        assert_eq!(char_value('z'), Some(31));
        assert_eq!(char_value('a'), None);
        assert_eq!(char_value('o'), None);
        assert!(is_valid("u4pruydqqvj"));
        assert!(!is_valid("u4pruydqqvl"));
    }
}
