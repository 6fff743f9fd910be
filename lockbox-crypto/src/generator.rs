//! Secure random password generation.
//!
//! All randomness comes from the OS RNG. A general-purpose PRNG is not
//! acceptable here: a predictable generator would undermine every password
//! it produces.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Character-class selection and target length for [`generate`].
#[derive(Clone, Copy, Debug)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Generates a random password satisfying the selected character classes.
///
/// Every selected class contributes at least one character. When `length`
/// is smaller than the number of selected classes, guarantees are dropped
/// lowest-priority first (priority order: uppercase, lowercase, digits,
/// symbols). With no class selected the charset falls back to lowercase.
///
/// The result is shuffled so guaranteed characters are not predictably
/// positioned.
pub fn generate(options: &GeneratorOptions) -> String {
    let mut rng = OsRng;

    let classes: [(bool, &[u8]); 4] = [
        (options.uppercase, UPPERCASE),
        (options.lowercase, LOWERCASE),
        (options.digits, DIGITS),
        (options.symbols, SYMBOLS),
    ];

    let mut charset: Vec<u8> = Vec::new();
    let mut chars: Vec<u8> = Vec::new();
    for (selected, class) in classes {
        if selected {
            charset.extend_from_slice(class);
            chars.push(class[rng.gen_range(0..class.len())]);
        }
    }

    if charset.is_empty() {
        charset.extend_from_slice(LOWERCASE);
        chars.push(LOWERCASE[rng.gen_range(0..LOWERCASE.len())]);
    }

    // Guarantees beyond the target length drop from the back (lowest priority).
    chars.truncate(options.length);

    while chars.len() < options.length {
        chars.push(charset[rng.gen_range(0..charset.len())]);
    }

    chars.shuffle(&mut rng);

    chars.into_iter().map(char::from).collect()
}
