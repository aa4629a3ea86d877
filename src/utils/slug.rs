//! Slug derivation for movies and actors.

/// Fold a Latin letter with a diacritic to its plain ASCII equivalent.
///
/// Covers the characters that actually occur in Czech names plus the
/// common Western European accents; anything else non-ASCII is dropped
/// by the caller.
fn fold_diacritic(ch: char) -> Option<char> {
    let folded = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ă' | 'å' => 'a',
        'č' | 'ç' | 'ć' => 'c',
        'ď' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ě' | 'ę' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ľ' | 'ĺ' | 'ł' => 'l',
        'ň' | 'ñ' | 'ń' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'ő' | 'ø' => 'o',
        'ř' => 'r',
        'š' | 'ś' | 'ş' => 's',
        'ť' => 't',
        'ú' | 'ù' | 'û' | 'ü' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ž' | 'ź' | 'ż' => 'z',
        'ß' => 's',
        _ => return None,
    };
    Some(folded)
}

/// Turn a display name into a lowercase, dash-separated ASCII slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for ch in name.trim().chars() {
        let ch = ch.to_lowercase().next().unwrap_or(ch);
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if let Some(folded) = fold_diacritic(ch) {
            slug.push(folded);
        } else if (ch.is_whitespace() || matches!(ch, '.' | '_' | '-' | '/' | '\\' | '\''))
            && !slug.ends_with('-')
            && !slug.is_empty()
        {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Derive the unique entity slug `{id}-{slugified name}`.
///
/// Embedding the generated id keeps slugs unique even when two entities
/// share the exact same name.
pub fn entity_slug(id: i32, name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        id.to_string()
    } else {
        format!("{}-{}", id, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("The Godfather"), "the-godfather");
        assert_eq!(slugify("  Twelve   Monkeys "), "twelve-monkeys");
        assert_eq!(slugify("Se7en"), "se7en");
    }

    #[test]
    fn test_slugify_czech_diacritics() {
        assert_eq!(
            slugify("Vykoupení z věznice Shawshank"),
            "vykoupeni-z-veznice-shawshank"
        );
        assert_eq!(slugify("Miloš Forman"), "milos-forman");
        assert_eq!(slugify("Přelet nad kukaččím hnízdem"), "prelet-nad-kukaccim-hnizdem");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Leon: The Professional"), "leon-the-professional");
        assert_eq!(slugify("…---…"), "");
    }

    #[test]
    fn test_entity_slug() {
        assert_eq!(entity_slug(42, "The Godfather"), "42-the-godfather");
        assert_eq!(entity_slug(7, "???"), "7");
    }
}
