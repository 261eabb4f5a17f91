//! URL slug generation for category, brand and product names.
//!
//! The generator does not check uniqueness against the store; callers that
//! need collision resistance use [`suffixed_slug`] with an external id or a
//! random number.

use rand::Rng;

pub const MAX_SLUG_LEN: usize = 100;

/// Derives a lowercase, hyphenated ASCII slug from a Cyrillic, Latin or
/// mixed name.
///
/// Input that leaves nothing usable (empty, punctuation only, unmapped
/// scripts) falls back to `item-<random number>`.
#[must_use]
pub fn generate_slug(name: &str) -> String {
    let mut slug = clean(name);
    truncate(&mut slug, MAX_SLUG_LEN);
    if slug.is_empty() {
        fallback_slug()
    } else {
        slug
    }
}

/// Slug for `name` with `-<suffix>` appended, still at most
/// [`MAX_SLUG_LEN`] characters. The base is shortened to make room; the
/// suffix is cleaned the same way as the name.
#[must_use]
pub fn suffixed_slug(name: &str, suffix: &str) -> String {
    let mut tail = clean(suffix);
    if tail.is_empty() {
        return generate_slug(name);
    }
    truncate(&mut tail, MAX_SLUG_LEN / 2);

    let mut base = generate_slug(name);
    truncate(&mut base, MAX_SLUG_LEN - tail.len() - 1);
    format!("{base}-{tail}")
}

/// A slug that only carries a random number, for names with no usable
/// characters.
#[must_use]
pub fn fallback_slug() -> String {
    let n: u32 = rand::rng().random_range(100_000..1_000_000);
    format!("item-{n}")
}

/// Lowercase, transliterate, and collapse every run outside `[a-z0-9]` into
/// a single hyphen. No leading or trailing hyphens.
fn clean(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.to_lowercase().chars() {
        let mapped = transliterate(ch);
        let mut push = |c: char| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            } else {
                pending_hyphen = true;
            }
        };
        match mapped {
            Some(latin) => latin.chars().for_each(&mut push),
            None => push(ch),
        }
    }

    out
}

/// Cuts an ASCII slug to at most `max` bytes and drops any hyphen left
/// dangling at the end.
fn truncate(slug: &mut String, max: usize) {
    if slug.len() > max {
        slug.truncate(max);
    }
    while slug.ends_with('-') {
        slug.pop();
    }
}

/// Latin spelling for a lowercase Cyrillic letter. Soft and hard signs and
/// apostrophes map to nothing so they do not split words.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'ґ' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'і' => "i",
        'ї' => "yi",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'ъ' | 'ь' | '\'' | '’' | 'ʼ' | '`' => "",
        _ => return None,
    };
    Some(latin)
}
