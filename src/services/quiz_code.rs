use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

pub const QUIZ_CODE_LENGTH: usize = 6;

static QUIZ_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{6}$").expect("QUIZ_CODE_REGEX is a valid regex pattern"));

/// Six letters, each drawn uniformly and independently from `A..=Z`.
pub fn generate_quiz_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..QUIZ_CODE_LENGTH)
        .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
        .collect()
}

/// Case-sensitive: lowercase input never names a quiz.
pub fn is_well_formed(code: &str) -> bool {
    QUIZ_CODE_REGEX.is_match(code)
}
