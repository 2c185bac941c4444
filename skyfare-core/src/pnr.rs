use rand::seq::SliceRandom;
use rand::Rng;

/// Carrier prefixes used for generated record locators.
const PREFIXES: [&str; 6] = ["FL", "AI", "IN", "UK", "SG", "DE"];

const PNR_LEN: usize = 8;

/// Generate an 8-character PNR: 2-letter prefix, 4 digits, 2 uppercase
/// letters, e.g. "FL3456AB". The random source is a parameter so callers
/// can make generation deterministic in tests.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = PREFIXES.choose(rng).copied().unwrap_or("FL");
    let digits: String = (0..4).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect();
    let letters: String = (0..2).map(|_| char::from(b'A' + rng.gen_range(0..26))).collect();
    format!("{}{}{}", prefix, digits, letters)
}

/// Shape check for a record locator: 2 letters, 4 digits, 2 letters.
pub fn validate(pnr: &str) -> bool {
    if pnr.len() != PNR_LEN || !pnr.is_ascii() {
        return false;
    }
    let bytes = pnr.as_bytes();
    bytes[..2].iter().all(|b| b.is_ascii_uppercase())
        && bytes[2..6].iter().all(|b| b.is_ascii_digit())
        && bytes[6..].iter().all(|b| b.is_ascii_uppercase())
}
