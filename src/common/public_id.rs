// src/common/public_id.rs

use rand::Rng;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

// Tamanhos dos IDs públicos expostos nas URLs.
pub const STORE_PUBLIC_ID_LEN: usize = 7;
pub const CONTRACT_PUBLIC_ID_LEN: usize = 8;

// Gera um ID público curto e alfanumérico.
// A unicidade é garantida pelo chamador (retry contra o índice UNIQUE).
pub fn generate(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate(STORE_PUBLIC_ID_LEN).len(), 7);
        assert_eq!(generate(CONTRACT_PUBLIC_ID_LEN).len(), 8);
    }

    #[test]
    fn only_uses_alphanumeric_characters() {
        let id = generate(64);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
