//! UTF-8 text generators for benchmarking and testing.
//!
//! Generators never split a character: when the next word does not fit the
//! remaining budget the output is padded with ASCII. [`corrupt_utf8`] then
//! splices malformed sequences into valid text to exercise error paths.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pattern types for UTF-8 text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Pattern {
    /// Pure ASCII (single-byte sequences)
    Ascii,
    /// Latin text with diacritics (mostly 1-byte, some 2-byte)
    Latin,
    /// Cyrillic (2-byte sequences)
    Cyrillic,
    /// Japanese and Chinese (3-byte sequences)
    Cjk,
    /// Emoji (4-byte sequences)
    Emoji,
    /// Mixed realistic prose with occasional non-ASCII
    Mixed,
    /// Uniform mix of all sequence lengths (1-4 bytes)
    AllLengths,
    /// Only 4-byte sequences, no whitespace
    Pathological,
}

const ASCII_WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "pack", "my", "box", "with",
    "five", "dozen", "liquor", "jugs", "sphinx", "of", "black", "quartz", "judge", "vow",
];

const LATIN_WORDS: &[&str] = &[
    "café", "résumé", "naïve", "über", "façade", "jalapeño", "mañana", "Ångström", "smörgåsbord",
    "Müller", "Größe", "Köln", "Zürich", "Malmö", "Łódź", "Kraków", "crème", "brûlée",
];

const CYRILLIC_WORDS: &[&str] = &[
    "Здравствуйте", "привет", "мир", "добро", "пожаловать", "спасибо", "Москва", "Киев",
    "Минск", "книга", "время", "город", "вода", "солнце",
];

const CJK_WORDS: &[&str] = &[
    "こんにちは", "ありがとう", "日本語", "東京", "世界", "你好", "中文", "北京", "漢字",
    "文字列", "検証", "文字",
];

const EMOJI: &[&str] = &[
    "😀", "😁", "😂", "🙂", "😉", "😊", "🥰", "🤔", "🚩", "🚀", "🎉", "🔥", "🌍", "💡", "🎯", "🎨",
];

const MIXED_WORDS: &[&str] = &[
    "Hello", "world", "this", "is", "plain", "text", "with", "a", "café", "and", "Здравствуйте",
    "or", "こんにちは", "then", "🚩", "some", "more", "words", "naïve", "😁",
];

const ONE_BYTE: &[&str] = &["A", "b", "7", "z", "Q", "x"];
const TWO_BYTE: &[&str] = &["é", "ñ", "ß", "д", "ж", "α", "ω", "\u{7FF}"];
const THREE_BYTE: &[&str] = &["日", "本", "こ", "ん", "中", "\u{800}", "\u{FFFD}", "\u{FFFF}"];
const FOUR_BYTE: &[&str] = &["😀", "🚩", "🎉", "\u{10000}", "\u{10FFFF}"];

/// Malformed sequences spliced in by [`corrupt_utf8`].
const MALFORMED: &[&[u8]] = &[
    b"\x80",             // lone continuation byte
    b"\xBF",             // lone continuation byte
    b"\xC0",             // lead with no continuation
    b"\xFF",             // never valid
    b"\xC1\x88",         // overlong 'H'
    b"\xE0\x80\xAF",     // overlong '/'
    b"\xED\xA0\x80",     // surrogate U+D800
    b"\xE3\x81",         // truncated 3-byte
    b"\xF0\x9F\x98",     // truncated 4-byte
    b"\xC3\x28",         // bad continuation
];

/// Generate UTF-8 text of exactly `target_size` bytes.
pub fn generate_utf8(target_size: usize, pattern: Utf8Pattern, seed: Option<u64>) -> Vec<u8> {
    let mut rng = seed.map(ChaCha8Rng::seed_from_u64);

    match pattern {
        Utf8Pattern::Ascii => fill_words(target_size, ASCII_WORDS, &mut rng, true),
        Utf8Pattern::Latin => fill_words(target_size, LATIN_WORDS, &mut rng, true),
        Utf8Pattern::Cyrillic => fill_words(target_size, CYRILLIC_WORDS, &mut rng, true),
        Utf8Pattern::Cjk => fill_words(target_size, CJK_WORDS, &mut rng, true),
        Utf8Pattern::Emoji => fill_words(target_size, EMOJI, &mut rng, true),
        Utf8Pattern::Mixed => fill_words(target_size, MIXED_WORDS, &mut rng, true),
        Utf8Pattern::AllLengths => generate_all_lengths(target_size, &mut rng),
        Utf8Pattern::Pathological => fill_words(target_size, FOUR_BYTE, &mut rng, false),
    }
}

/// Pick an index, deterministically cycling through `n` without a seed.
fn pick(rng: &mut Option<ChaCha8Rng>, n: usize, fallback: usize) -> usize {
    rng.as_mut()
        .map(|r| r.gen_range(0..n))
        .unwrap_or(fallback % n)
}

/// Append words, wrapping lines at 80 bytes, then pad with ASCII.
fn fill_words(
    target_size: usize,
    words: &[&str],
    rng: &mut Option<ChaCha8Rng>,
    spaced: bool,
) -> Vec<u8> {
    let mut result = Vec::with_capacity(target_size);
    let mut line_len = 0;
    let mut count = 0;

    loop {
        let word = words[pick(rng, words.len(), count)].as_bytes();
        count += 1;

        let separator: &[u8] = if !spaced || line_len == 0 {
            b""
        } else if line_len + word.len() + 1 > 80 {
            b"\n"
        } else {
            b" "
        };

        if result.len() + separator.len() + word.len() > target_size {
            break;
        }

        result.extend_from_slice(separator);
        if separator == b"\n" {
            line_len = 0;
        } else {
            line_len += separator.len();
        }
        result.extend_from_slice(word);
        line_len += word.len();
    }

    result.resize(target_size, if spaced { b' ' } else { b'X' });
    result
}

/// Characters of every encoded length, with occasional whitespace.
fn generate_all_lengths(target_size: usize, rng: &mut Option<ChaCha8Rng>) -> Vec<u8> {
    let mut result = Vec::with_capacity(target_size);
    let mut count = 0;

    while result.len() < target_size {
        let table = match pick(rng, 4, count) {
            0 => ONE_BYTE,
            1 => TWO_BYTE,
            2 => THREE_BYTE,
            _ => FOUR_BYTE,
        };
        let ch = table[pick(rng, table.len(), count / 4)].as_bytes();
        count += 1;

        if result.len() + ch.len() > target_size {
            break;
        }
        result.extend_from_slice(ch);

        if result.len() < target_size {
            match pick(rng, 8, count) {
                0 => result.push(b'\n'),
                1 => result.push(b' '),
                _ => {}
            }
        }
    }

    result.resize(target_size, b' ');
    result
}

/// Replace roughly `density` of the characters in `text` with malformed sequences.
///
/// Returns the number of sequences inserted. Replacements land on character
/// boundaries, so the text around each one stays intact.
pub fn corrupt_utf8(text: &mut Vec<u8>, density: f64, seed: Option<u64>) -> usize {
    // Offset the seed so corruption is independent of generation
    let mut rng = ChaCha8Rng::seed_from_u64(seed.map_or(0, |s| s.wrapping_add(1)));
    let density = density.clamp(0.0, 1.0);

    let mut out = Vec::with_capacity(text.len());
    let mut inserted = 0;
    let mut iter = match utf8view::Utf8Str::new(text) {
        Ok(view) => view.chars(),
        Err(_) => return 0,
    };

    loop {
        let ch = iter.advance();
        if ch.is_end() {
            break;
        }
        if rng.gen_bool(density) {
            out.extend_from_slice(MALFORMED[rng.gen_range(0..MALFORMED.len())]);
            inserted += 1;
        } else {
            out.extend_from_slice(ch.as_bytes());
        }
    }

    *text = out;
    inserted
}

#[cfg(test)]
mod tests {
    use super::*;
    use utf8view::validate_utf8;

    const ALL: [Utf8Pattern; 8] = [
        Utf8Pattern::Ascii,
        Utf8Pattern::Latin,
        Utf8Pattern::Cyrillic,
        Utf8Pattern::Cjk,
        Utf8Pattern::Emoji,
        Utf8Pattern::Mixed,
        Utf8Pattern::AllLengths,
        Utf8Pattern::Pathological,
    ];

    #[test]
    fn test_patterns_are_valid_and_exact_size() {
        for pattern in ALL {
            for size in [0, 1, 3, 100, 4096] {
                let text = generate_utf8(size, pattern, Some(42));
                assert_eq!(text.len(), size, "{:?} {}", pattern, size);
                assert_eq!(validate_utf8(&text), Ok(size), "{:?} {}", pattern, size);

                let unseeded = generate_utf8(size, pattern, None);
                assert!(validate_utf8(&unseeded).is_ok(), "{:?} {}", pattern, size);
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_utf8(2048, Utf8Pattern::Mixed, Some(7));
        let b = generate_utf8(2048, Utf8Pattern::Mixed, Some(7));
        let c = generate_utf8(2048, Utf8Pattern::Mixed, Some(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_pattern_byte_widths() {
        let cjk = generate_utf8(1024, Utf8Pattern::Cjk, Some(1));
        let view = utf8view::Utf8Str::new(&cjk).unwrap();
        assert!(view.chars().any(|c| c.byte_len() == 3));

        let emoji = generate_utf8(1024, Utf8Pattern::Pathological, Some(1));
        let view = utf8view::Utf8Str::new(&emoji).unwrap();
        assert!(view.chars().filter(|c| c.as_bytes() != b"X").all(|c| c.byte_len() == 4));
    }

    #[test]
    fn test_corruption() {
        let mut text = generate_utf8(4096, Utf8Pattern::Mixed, Some(3));
        let inserted = corrupt_utf8(&mut text, 0.05, Some(3));
        assert!(inserted > 0);
        assert!(validate_utf8(&text).is_err());

        let mut clean = generate_utf8(512, Utf8Pattern::Cjk, Some(3));
        let original = clean.clone();
        assert_eq!(corrupt_utf8(&mut clean, 0.0, Some(3)), 0);
        assert_eq!(clean, original);
    }
}
