// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("valid regex"));
static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// Build a URL-safe slug from a category name.
///
/// `"Alimentação Fora"` becomes `"alimentacao-fora"`.
pub fn slugify(name: &str) -> String {
    // Decompose, then drop the marks so accented letters keep their base.
    let folded: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let lower = folded.to_lowercase();
    let dashed = WHITESPACE.replace_all(lower.trim(), "-");
    let cleaned = DISALLOWED.replace_all(&dashed, "");
    let collapsed = DASHES.replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn strips_accents_and_spaces() {
        assert_eq!(slugify("Alimentação Fora"), "alimentacao-fora");
        assert_eq!(slugify("Saúde & Bem-estar"), "saude-bem-estar");
    }

    #[test]
    fn collapses_and_trims_dashes() {
        assert_eq!(slugify("  Contas   da  Casa  "), "contas-da-casa");
        assert_eq!(slugify("--Lazer--"), "lazer");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn strips_marks_beyond_latin1() {
        assert_eq!(slugify("Ștefan"), "stefan");
        assert_eq!(slugify("Ǎgua"), "agua");
        // đ is a distinct letter with no decomposition, so it is dropped
        assert_eq!(slugify("Tiền điện"), "tien-ien");
    }
}
