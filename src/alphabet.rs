use anyhow::{Result, bail};

pub const ALPHANUMERIC: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Base character class the alphabet is built from before applying
/// include/exclude sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseClass {
    /// All printable ASCII except whitespace (0x21..=0x7E, 94 bytes).
    Printable,
    /// `[a-zA-Z0-9]` only.
    Alphanumeric,
    /// Empty base; the alphabet is exactly the include set.
    IncludeOnly,
}

/// The permitted output byte set for a derivation call.
///
/// Membership is byte-level: generated passwords are built by accepting
/// digest bytes that fall inside this set, so the set must be fixed
/// before derivation starts.
#[derive(Debug)]
pub struct Alphabet {
    members: [bool; 256],
    len: usize,
}

impl Alphabet {
    /// Build an alphabet from a base class plus include/exclude sets.
    ///
    /// Whitespace is always removed, whatever the include set says.
    /// Fails if the result is empty, since derivation over an empty
    /// alphabet can never terminate.
    pub fn build(base: BaseClass, include: &str, exclude: &str) -> Result<Self> {
        let mut members = [false; 256];

        match base {
            BaseClass::Printable => {
                for byte in 0x21..=0x7Eu8 {
                    members[byte as usize] = true;
                }
            }
            BaseClass::Alphanumeric => {
                for &byte in ALPHANUMERIC {
                    members[byte as usize] = true;
                }
            }
            BaseClass::IncludeOnly => {}
        }

        for &byte in include.as_bytes() {
            members[byte as usize] = true;
        }
        for &byte in exclude.as_bytes() {
            members[byte as usize] = false;
        }
        for byte in 0..=255u8 {
            if byte.is_ascii_whitespace() || byte == 0x0B {
                members[byte as usize] = false;
            }
        }

        let len = members.iter().filter(|&&m| m).count();
        if len == 0 {
            bail!(
                "No valid characters available: the include/exclude settings leave an empty alphabet"
            );
        }

        Ok(Self { members, len })
    }

    /// Build an alphabet from an explicit byte set, with no base class,
    /// no whitespace stripping, and no emptiness check. The caller is
    /// expected to know exactly which bytes it wants.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut members = [false; 256];
        for &byte in bytes {
            members[byte as usize] = true;
        }
        let len = members.iter().filter(|&&m| m).count();
        Self { members, len }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.members[byte as usize]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_base_size() {
        let alphabet = Alphabet::build(BaseClass::Printable, "", "").unwrap();
        assert_eq!(alphabet.len(), 94);
        assert!(alphabet.contains(b'!'));
        assert!(alphabet.contains(b'~'));
        assert!(alphabet.contains(b'a'));
        assert!(!alphabet.contains(b' '));
        assert!(!alphabet.contains(b'\t'));
        assert!(!alphabet.contains(0x7F));
    }

    #[test]
    fn test_alphanumeric_base_size() {
        let alphabet = Alphabet::build(BaseClass::Alphanumeric, "", "").unwrap();
        assert_eq!(alphabet.len(), 62);
        assert!(alphabet.contains(b'A'));
        assert!(alphabet.contains(b'z'));
        assert!(alphabet.contains(b'0'));
        assert!(!alphabet.contains(b'!'));
        assert!(!alphabet.contains(b'-'));
    }

    #[test]
    fn test_exclude_removes_characters() {
        let alphabet = Alphabet::build(BaseClass::Alphanumeric, "", "aeiouAEIOU0").unwrap();
        assert_eq!(alphabet.len(), 51);
        assert!(!alphabet.contains(b'a'));
        assert!(!alphabet.contains(b'E'));
        assert!(!alphabet.contains(b'0'));
        assert!(alphabet.contains(b'b'));
    }

    #[test]
    fn test_include_adds_characters() {
        let alphabet = Alphabet::build(BaseClass::Alphanumeric, "-_", "").unwrap();
        assert_eq!(alphabet.len(), 64);
        assert!(alphabet.contains(b'-'));
        assert!(alphabet.contains(b'_'));
    }

    #[test]
    fn test_include_only_base() {
        let alphabet = Alphabet::build(BaseClass::IncludeOnly, "abc123", "").unwrap();
        assert_eq!(alphabet.len(), 6);
        assert!(alphabet.contains(b'a'));
        assert!(alphabet.contains(b'1'));
        assert!(!alphabet.contains(b'd'));
    }

    #[test]
    fn test_whitespace_never_included() {
        let alphabet = Alphabet::build(BaseClass::Printable, " \t\n\x0b\x0c\r", "").unwrap();
        assert!(!alphabet.contains(b' '));
        assert!(!alphabet.contains(b'\t'));
        assert!(!alphabet.contains(b'\n'));
        assert!(!alphabet.contains(0x0B));
        assert!(!alphabet.contains(0x0C));
        assert!(!alphabet.contains(b'\r'));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let alphabet = Alphabet::build(BaseClass::IncludeOnly, "abc", "b").unwrap();
        assert_eq!(alphabet.len(), 2);
        assert!(!alphabet.contains(b'b'));
    }

    #[test]
    fn test_empty_alphabet_is_rejected() {
        let result = Alphabet::build(BaseClass::IncludeOnly, "", "");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("No valid characters available")
        );
    }

    #[test]
    fn test_excluding_everything_is_rejected() {
        let everything: String = (0x21..=0x7Eu8).map(|b| b as char).collect();
        let result = Alphabet::build(BaseClass::Printable, "", &everything);
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_format() {
        // Build results get unwrapped and debug-printed all over the
        // test suite; keep the impl around.
        let alphabet = Alphabet::build(BaseClass::Alphanumeric, "", "").unwrap();
        let rendered = format!("{:?}", alphabet);
        assert!(rendered.contains("Alphabet"));
        assert!(rendered.contains("len: 62"));
    }

    #[test]
    fn test_from_bytes_is_unchecked() {
        let alphabet = Alphabet::from_bytes(&[]);
        assert!(alphabet.is_empty());

        let alphabet = Alphabet::from_bytes(b"xyz");
        assert_eq!(alphabet.len(), 3);
        assert!(alphabet.contains(b'x'));
    }
}
