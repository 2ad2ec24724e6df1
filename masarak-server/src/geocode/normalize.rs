//! Name normalization and fuzzy string matching.
//!
//! Station and area names arrive as free text typed on a phone keyboard:
//! mixed hamza forms, optional tashkeel, stray whitespace. All matching
//! happens on the normalized form.

/// Normalize a station or area name for matching.
///
/// Lowercases Latin text, strips Arabic tashkeel and tatweel, folds hamza
/// alef variants to bare alef, teh marbuta to heh, alef maqsura to yeh,
/// and collapses runs of whitespace.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.chars() {
        match c {
            // Tatweel and the tashkeel block carry no lexical information.
            '\u{0640}' | '\u{064B}'..='\u{0652}' => {}
            'أ' | 'إ' | 'آ' | 'ٱ' => out.push('ا'),
            'ة' => out.push('ه'),
            'ى' => out.push('ي'),
            'ؤ' => out.push('و'),
            'ئ' => out.push('ي'),
            c if c.is_whitespace() => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c => out.extend(c.to_lowercase()),
        }
    }

    out.trim().to_string()
}

/// Levenshtein edit distance over characters (not bytes).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in [0, 1]: `1 - distance / max_len`. Two empty strings are
/// fully similar.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}
