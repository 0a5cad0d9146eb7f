//! Seed input handling.
//!
//! Every visual and physical parameter of a generation is derived from an
//! opaque hexadecimal seed string. Disjoint fixed-offset substrings of the
//! seed are parsed as hexadecimal integers and reduced modulo the length of
//! a candidate table to make each selection; identical seeds therefore
//! always produce identical parameter bundles.
//!
//! The alternate input mode is an [`AttributeRecord`]: a flat record with
//! integer-coded fields that has already been resolved upstream (for
//! example by a minting service) and is validated rather than derived.

use crate::error::SeedError;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Minimum seed length: the end of the last parsed field.
pub const MIN_SEED_LEN: usize = 22;

/// Number of hex characters in a freshly minted seed.
const RANDOM_SEED_LEN: usize = 64;

/// A validated hexadecimal seed string.
///
/// Construction checks that the string is long enough to supply every
/// parameter field and that every parsed position holds a hex digit, so
/// field extraction is infallible afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    /// Validate and wrap a hex seed string.
    pub fn new(seed: impl Into<String>) -> Result<Self, SeedError> {
        let seed = seed.into();
        if seed.len() < MIN_SEED_LEN {
            return Err(SeedError::TooShort {
                length: seed.len(),
                required: MIN_SEED_LEN,
            });
        }
        for (index, character) in seed.chars().take(MIN_SEED_LEN).enumerate() {
            if !character.is_ascii_hexdigit() {
                return Err(SeedError::InvalidHex { index, character });
            }
        }
        Ok(Seed(seed))
    }

    /// Mint a fresh random seed.
    ///
    /// Used when the caller supplies no seed of its own. The result is
    /// always valid.
    pub fn random() -> Self {
        let mut rng = SmallRng::from_entropy();
        let seed: String = (0..RANDOM_SEED_LEN)
            .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
            .collect();
        Seed(seed)
    }

    /// The underlying hex string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the substring at `range` as a hexadecimal integer.
    ///
    /// The range must lie within the validated prefix; construction
    /// guarantees every character there is a hex digit.
    pub(crate) fn field(&self, range: Range<usize>) -> u64 {
        debug_assert!(range.end <= MIN_SEED_LEN);
        self.0[range]
            .bytes()
            .fold(0u64, |acc, b| (acc << 4) | hex_digit(b))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Seed {
    type Error = SeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Seed::new(value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

/// Value of one validated hex digit byte.
fn hex_digit(b: u8) -> u64 {
    match b {
        b'0'..=b'9' => (b - b'0') as u64,
        b'a'..=b'f' => (b - b'a' + 10) as u64,
        b'A'..=b'F' => (b - b'A' + 10) as u64,
        _ => 0,
    }
}

/// A pre-resolved parameter record.
///
/// Alternate input mode: instead of deriving selections from a hex seed,
/// the caller supplies the selections directly. Value-typed fields (`pc`,
/// `pm`, `pt`, `s`, `r`, `b`) carry the chosen value itself; code-typed
/// fields (`ps`, `is`, `im`, `bg`, `ic`) index into the same candidate
/// tables seed derivation uses and are validated on resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    /// Gradient anchor colors as `#RRGGBB` strings.
    #[serde(rename = "gc")]
    pub gradient_colors: Vec<String>,
    /// Gradient step count (number of distinct particle colors).
    #[serde(rename = "pc")]
    pub step: usize,
    /// Particle count multiplier.
    #[serde(rename = "pm")]
    pub multiplier: u32,
    /// Trail capacity in positions.
    #[serde(rename = "pt")]
    pub trail: usize,
    /// Particle size code: 0 = 0.1, 1 = 1.0.
    #[serde(rename = "ps")]
    pub size_code: u8,
    /// Integration step code: 0 = 0.001, 1 = 0.005.
    #[serde(rename = "is")]
    pub dt_code: u8,
    /// Integration method code: 0 = Euler, 1 = RK4.
    #[serde(rename = "im")]
    pub integrator_code: u8,
    /// Background code: 0 = black, 1 = light gray.
    #[serde(rename = "bg")]
    pub background_code: u8,
    /// Initial-conditions pattern code, 1 through 8.
    #[serde(rename = "ic")]
    pub pattern_code: u8,
    /// Prandtl number sigma.
    #[serde(rename = "s")]
    pub sigma: f64,
    /// Rayleigh number rho.
    #[serde(rename = "r")]
    pub rho: f64,
    /// Geometric factor beta.
    #[serde(rename = "b")]
    pub beta: f64,
}

/// Parse a `#RRGGBB` color string into an RGB color with 0-1 channels.
pub(crate) fn parse_color(value: &str) -> Result<Vec3, SeedError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SeedError::InvalidColor {
            value: value.to_string(),
        });
    }
    let packed = hex.bytes().fold(0u32, |acc, b| (acc << 4) | hex_digit(b) as u32);
    Ok(Vec3::new(
        ((packed >> 16) & 0xff) as f32 / 255.0,
        ((packed >> 8) & 0xff) as f32 / 255.0,
        (packed & 0xff) as f32 / 255.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_seed() {
        let seed = Seed::new("0123456789abcdef012345").unwrap();
        assert_eq!(seed.as_str().len(), 22);
    }

    #[test]
    fn test_seed_too_short() {
        let err = Seed::new("abc123").unwrap_err();
        assert_eq!(
            err,
            SeedError::TooShort {
                length: 6,
                required: MIN_SEED_LEN,
            }
        );
    }

    #[test]
    fn test_seed_non_hex() {
        let err = Seed::new("0123456789abcdefg12345").unwrap_err();
        assert_eq!(
            err,
            SeedError::InvalidHex {
                index: 16,
                character: 'g',
            }
        );
    }

    #[test]
    fn test_seed_tail_not_validated() {
        // Only the parsed prefix must be hex; a longer tail may be anything.
        assert!(Seed::new("0123456789abcdef012345zz").is_ok());
    }

    #[test]
    fn test_field_extraction() {
        let seed = Seed::new("00fff00000000000000000").unwrap();
        assert_eq!(seed.field(0..5), 0xfff);
        assert_eq!(seed.field(3..5), 0xff);
        assert_eq!(seed.field(5..7), 0x00);
    }

    #[test]
    fn test_random_seed_is_valid() {
        let seed = Seed::random();
        assert_eq!(seed.as_str().len(), 64);
        assert!(Seed::new(seed.as_str()).is_ok());
    }

    #[test]
    fn test_parse_color() {
        let c = parse_color("#ff8000").unwrap();
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert!(c.z.abs() < 1e-6);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn test_record_field_names() {
        let json = r##"{
            "gc": ["#091e3a", "#2f80ed"],
            "pc": 4, "pm": 100, "pt": 1000,
            "ps": 1, "is": 0, "im": 1, "bg": 0, "ic": 3,
            "s": 10.0, "r": 28.0, "b": 2.6666666666666665
        }"##;
        let record: AttributeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.step, 4);
        assert_eq!(record.multiplier, 100);
        assert_eq!(record.pattern_code, 3);
        assert!((record.beta - 8.0 / 3.0).abs() < 1e-12);
    }
}
