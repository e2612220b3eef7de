//! Slug and reading-time derivation shared by every service.

/// Derive a URL-safe slug from a human-readable name or title.
///
/// Lowercases, folds accented Latin vowels and `ç` to ASCII, strips
/// everything outside `[a-z0-9 -]`, collapses whitespace and hyphen runs
/// to a single hyphen and trims the ends. Idempotent and deterministic.
pub fn slugify(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' | 'è' => 'e',
            'í' | 'ì' | 'î' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' => 'o',
            'ú' | 'ù' | 'û' => 'u',
            'ç' => 'c',
            other => other,
        })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
    }
    slug
}

/// Estimated minutes to read `content` at 200 words per minute, rounded
/// up. Matches the original's word split, which never counts below one.
pub fn reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count().max(1);
    words.div_ceil(200) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_hyphenates() {
        assert_eq!(slugify("Autocuidado e Bem-estar"), "autocuidado-e-bem-estar");
        assert_eq!(slugify("Ética & Ação"), "etica-acao");
    }

    #[test]
    fn strips_symbols_and_collapses_runs() {
        assert_eq!(slugify("  Hello --  World!  "), "hello-world");
        assert_eq!(slugify("Café, chá & água"), "cafe-cha-agua");
    }

    #[test]
    fn is_idempotent() {
        for input in ["Autocuidado e Bem-estar", "Ética & Ação", "já-um-slug"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("uma frase curta"), 1);
        let long = "palavra ".repeat(401);
        assert_eq!(reading_time(&long), 3);
    }
}
