use std::fmt;

/// Characters whose escapes `decode_uri` leaves untouched.
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Decode a URI-encoded string the way ECMAScript's `decodeURI` does.
///
/// Escapes of the reserved set (`; / ? : @ & = + $ , #`) stay encoded.  A `%` that is not
/// followed by two hex digits, or escapes that do not form valid UTF-8, are errors.
pub fn decode_uri(input: &str) -> Result<String, DecodeError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b != b'%' {
            decoded.push(b);
            i += 1;
            continue;
        }

        let escape = bytes.get(i + 1..i + 3).ok_or(DecodeError::Truncated { offset: i })?;
        let value = match (hex_value(escape[0]), hex_value(escape[1])) {
            (Some(hi), Some(lo)) => (hi << 4) | lo,
            _ => return Err(DecodeError::InvalidEscape { offset: i }),
        };
        if RESERVED.contains(&value) {
            decoded.extend_from_slice(&bytes[i..i + 3]);
        } else {
            decoded.push(value);
        }
        i += 3;
    }

    String::from_utf8(decoded).map_err(|e| DecodeError::InvalidUtf8 {
        offset: e.utf8_error().valid_up_to(),
    })
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Malformed percent-encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// `%` without two following characters
    Truncated { offset: usize },
    /// `%` followed by something other than two hex digits
    InvalidEscape { offset: usize },
    /// Escaped bytes are not UTF-8; `offset` is into the decoded bytes
    InvalidUtf8 { offset: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { offset } => {
                write!(f, "URI malformed: truncated escape at byte {offset}")
            }
            Self::InvalidEscape { offset } => {
                write!(f, "URI malformed: invalid escape at byte {offset}")
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "URI malformed: escapes are not UTF-8 (decoded byte {offset})")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(decode_uri("Sports Culture").unwrap(), "Sports Culture");
        assert_eq!(decode_uri("").unwrap(), "");
    }

    #[test]
    fn decodes_spaces_and_multibyte() {
        assert_eq!(
            decode_uri("F%C3%BAtbol%20Club").unwrap(),
            "F\u{fa}tbol Club"
        );
        assert_eq!(decode_uri("%E2%9A%BD").unwrap(), "\u{26bd}");
    }

    #[test]
    fn lowercase_hex_is_accepted() {
        assert_eq!(decode_uri("a%2db").unwrap(), "a-b");
    }

    #[test]
    fn reserved_escapes_stay_encoded() {
        assert_eq!(decode_uri("a%2Fb%3Fc%23d").unwrap(), "a%2Fb%3Fc%23d");
        assert_eq!(decode_uri("Q%26A").unwrap(), "Q%26A");
    }

    #[test]
    fn literal_reserved_characters_pass_through() {
        assert_eq!(decode_uri("a/b?c=d").unwrap(), "a/b?c=d");
    }

    #[test]
    fn truncated_escape_is_an_error() {
        assert_eq!(
            decode_uri("100%").unwrap_err(),
            DecodeError::Truncated { offset: 3 }
        );
        assert_eq!(
            decode_uri("%E0%A4%A").unwrap_err(),
            DecodeError::Truncated { offset: 6 }
        );
    }

    #[test]
    fn non_hex_escape_is_an_error() {
        assert_eq!(
            decode_uri("50%off").unwrap_err(),
            DecodeError::InvalidEscape { offset: 2 }
        );
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        assert_eq!(
            decode_uri("ab%C3").unwrap_err(),
            DecodeError::InvalidUtf8 { offset: 2 }
        );
        assert!(decode_uri("%FF").is_err());
    }
}
