use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip combining diacritical marks from a city name.
///
/// The weather API chokes on accented query strings, so the name is
/// canonically decomposed (NFD) and every combining mark is dropped. Base
/// letters and all other characters pass through untouched, which makes the
/// function idempotent: output contains no decomposable characters left to
/// strip.
pub fn strip_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
