use rand::Rng;

/// Letters a round can start with.
const ROUND_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Join-code alphabet with easily-confused characters (I, O, 0, 1) left out.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Uniform random round letter. Every round rolls independently; previously
/// used letters are not excluded.
pub fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    ROUND_LETTERS[rng.gen_range(0..ROUND_LETTERS.len())] as char
}

/// Random join code over the unambiguous alphabet.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Join codes are matched case-insensitively.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
