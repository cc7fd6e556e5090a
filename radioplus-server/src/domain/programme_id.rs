//! Programme identifier type.

use std::fmt;

/// Error returned when parsing an invalid programme id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid programme id: {reason}")]
pub struct InvalidProgrammeId {
    reason: &'static str,
}

/// A programme identifier in canonical UUID form.
///
/// Upstream keys every on-demand programme by a `collectionID` shaped like a
/// UUID: five dash-separated groups of hex digits (8-4-4-4-12), a version
/// nibble of 0-5 and a variant nibble of 0, 8, 9, a or b. Validation is
/// case-insensitive, but the id is stored exactly as given: the upstream
/// search compares ids by exact string equality, so normalizing the case here
/// would change which programmes match.
///
/// # Examples
///
/// ```
/// use radioplus_server::domain::ProgrammeId;
///
/// let id = ProgrammeId::parse("f14a0d1e-2b33-43a5-96d4-9c96aa81adbb").unwrap();
/// assert_eq!(id.as_str(), "f14a0d1e-2b33-43a5-96d4-9c96aa81adbb");
///
/// // Wrong shape is rejected
/// assert!(ProgrammeId::parse("not-a-uuid").is_err());
///
/// // Version nibbles above 5 are rejected
/// assert!(ProgrammeId::parse("f14a0d1e-2b33-73a5-96d4-9c96aa81adbb").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProgrammeId(String);

/// Byte offsets of the group separators in a canonical UUID string.
const DASH_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Byte offset of the version nibble (first digit of the third group).
const VERSION_POSITION: usize = 14;

/// Byte offset of the variant nibble (first digit of the fourth group).
const VARIANT_POSITION: usize = 19;

impl ProgrammeId {
    /// Parse a programme id from a string.
    ///
    /// The input must be a canonical UUID: 36 bytes, dashes at positions
    /// 8, 13, 18 and 23, hex digits everywhere else, version nibble 0-5,
    /// variant nibble 0/8/9/a/b. Hex digits may be upper or lower case.
    pub fn parse(s: &str) -> Result<Self, InvalidProgrammeId> {
        let bytes = s.as_bytes();

        if bytes.len() != 36 {
            return Err(InvalidProgrammeId {
                reason: "must be 36 characters in 8-4-4-4-12 form",
            });
        }

        for (i, &b) in bytes.iter().enumerate() {
            if DASH_POSITIONS.contains(&i) {
                if b != b'-' {
                    return Err(InvalidProgrammeId {
                        reason: "groups must be separated by dashes",
                    });
                }
            } else if !b.is_ascii_hexdigit() {
                return Err(InvalidProgrammeId {
                    reason: "groups must contain only hex digits",
                });
            }
        }

        if !(b'0'..=b'5').contains(&bytes[VERSION_POSITION]) {
            return Err(InvalidProgrammeId {
                reason: "version nibble must be 0-5",
            });
        }

        if !matches!(
            bytes[VARIANT_POSITION].to_ascii_lowercase(),
            b'0' | b'8' | b'9' | b'a' | b'b'
        ) {
            return Err(InvalidProgrammeId {
                reason: "variant nibble must be 0, 8, 9, a or b",
            });
        }

        Ok(ProgrammeId(s.to_string()))
    }

    /// Returns the id as a string slice, in its original case.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProgrammeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgrammeId({})", self.0)
    }
}

impl fmt::Display for ProgrammeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
