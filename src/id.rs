use nanoid::nanoid;

/// Canonical alphabet for document identifiers (lowercase hex).
const ENTITY_ID_ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];
/// Fixed identifier length.
pub const ENTITY_ID_LENGTH: usize = 24;

/// Generates a new document identifier using the configured alphabet and length.
pub fn generate_entity_id() -> String {
    nanoid!(ENTITY_ID_LENGTH, ENTITY_ID_ALPHABET)
}

/// Returns `true` if the candidate is a syntactically valid document identifier.
///
/// Pure check, no store access: fixed length, hex digits only. Input case is
/// not significant.
pub fn is_valid_entity_id(candidate: &str) -> bool {
    candidate.len() == ENTITY_ID_LENGTH && candidate.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_has_expected_length_and_charset() {
        let id = generate_entity_id();
        assert_eq!(id.len(), ENTITY_ID_LENGTH);
        assert!(id.chars().all(|c| ENTITY_ID_ALPHABET.contains(&c)));
    }

    #[test]
    fn generated_ids_validate() {
        assert!(is_valid_entity_id(&generate_entity_id()));
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        assert!(is_valid_entity_id("5F9B2C1D4E8A7B6C5D4E3F2A"));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(!is_valid_entity_id(""));
        assert!(!is_valid_entity_id("123"));
        assert!(!is_valid_entity_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
        assert!(!is_valid_entity_id("5f9b2c1d4e8a7b6c5d4e3f2a9"));
    }
}
