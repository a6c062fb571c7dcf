// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Catalog query engine - filter and sort shops against a free-text query

use crate::types::Shop;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sort order for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest rating first; equal ratings keep dataset order
    #[default]
    Rating,
    /// Alphabetical by name, pt-BR collation
    Name,
}

impl SortKey {
    /// CLI/config spelling
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rating" | "avaliacao" => Ok(Self::Rating),
            "name" | "nome" => Ok(Self::Name),
            other => Err(format!("unknown sort key: {other}. Valid: rating, name")),
        }
    }
}

/// Normalize text for matching: lower-case, decompose, drop diacritics
///
/// Only the combining diacritical marks block (U+0300..U+036F) is removed,
/// so "Cárrö" and "carro" normalize to the same string.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Whether `query` occurs in `text` after normalizing both
#[must_use]
pub fn contains_normalized(text: &str, query: &str) -> bool {
    normalize(text).contains(&normalize(query))
}

/// Whether a shop matches an already-normalized query
fn shop_matches(shop: &Shop, needle: &str) -> bool {
    normalize(&shop.name).contains(needle)
        || normalize(&shop.address).contains(needle)
        || shop
            .specialties
            .iter()
            .any(|tag| normalize(tag).contains(needle))
}

/// Compare two strings the way pt-BR collation orders them
///
/// Base letters decide first, ignoring case and accents, so "Ágil" sorts
/// next to "Agil" and before "Auto". Remaining ties are broken by accents
/// (unaccented first), then by case (lowercase first).
///
/// Punctuation and symbols sort before digits, digits before letters.
/// Latin letters without a decomposition are folded through a small table
/// (`æ` as `ae`, `ß` as `ss`, `ø` as `o`); letters of other scripts keep
/// code-point order after the Latin alphabet.
#[must_use]
pub fn compare_pt_br(a: &str, b: &str) -> Ordering {
    let secondary = |s: &str| -> String { s.to_lowercase().nfd().collect() };
    primary(a)
        .cmp(&primary(b))
        .then_with(|| secondary(a).cmp(&secondary(b)))
        .then_with(|| tertiary(a).cmp(&tertiary(b)))
}

/// Base-letter key: folded characters tagged with their class
fn primary(s: &str) -> Vec<(u8, char)> {
    let mut folded = String::new();
    for c in normalize(s).chars() {
        match c {
            'æ' => folded.push_str("ae"),
            'œ' => folded.push_str("oe"),
            'ß' => folded.push_str("ss"),
            'ø' => folded.push('o'),
            'đ' | 'ð' => folded.push('d'),
            'ł' => folded.push('l'),
            'ı' => folded.push('i'),
            'þ' => folded.push_str("th"),
            other => folded.push(other),
        }
    }
    folded.chars().map(|c| (char_class(c), c)).collect()
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// Case key: one flag per character, lowercase sorting before uppercase
fn tertiary(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

/// Filter and order shops
///
/// A shop matches when the normalized query is a substring of its name, its
/// address or any specialty tag. An empty query matches every shop. The
/// input slice is left untouched.
#[must_use]
pub fn search<'a>(shops: &'a [Shop], query: &str, sort: SortKey) -> Vec<&'a Shop> {
    let needle = normalize(query);
    let mut results: Vec<&Shop> = shops
        .iter()
        .filter(|shop| shop_matches(shop, &needle))
        .collect();
    sort_shops(&mut results, sort);
    results
}

/// Stable sort of shop references
pub fn sort_shops(shops: &mut [&Shop], sort: SortKey) {
    match sort {
        SortKey::Rating => shops.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Name => shops.sort_by(|a, b| compare_pt_br(&a.name, &b.name)),
    }
}

/// Search screen state, owned by the caller and threaded through queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Current search text
    #[serde(default)]
    pub query: String,
    /// Current sort order
    #[serde(default)]
    pub sort: SortKey,
    /// Favourite shop IDs
    #[serde(default)]
    pub favorites: BTreeSet<String>,
    /// Restrict results to favourites
    #[serde(default)]
    pub favorites_only: bool,
}

impl ViewState {
    /// Fresh state with the given sort order
    #[must_use]
    pub fn with_sort(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Replace the search text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Replace the sort order
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Flip a shop's favourite flag; returns the new flag
    pub fn toggle_favorite(&mut self, shop_id: &str) -> bool {
        if self.favorites.remove(shop_id) {
            false
        } else {
            self.favorites.insert(shop_id.to_string());
            true
        }
    }

    /// Whether a shop is a favourite
    #[must_use]
    pub fn is_favorite(&self, shop_id: &str) -> bool {
        self.favorites.contains(shop_id)
    }

    /// Run the search this state describes
    #[must_use]
    pub fn results<'a>(&self, shops: &'a [Shop]) -> Vec<&'a Shop> {
        let mut results = search(shops, &self.query, self.sort);
        if self.favorites_only {
            results.retain(|shop| self.is_favorite(&shop.id));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn make_shop(id: &str, name: &str, rating: f64, specialties: &[&str]) -> Shop {
        Shop {
            id: id.into(),
            name: name.into(),
            address: format!("Rua {id}, 10"),
            phone: "1133334444".into(),
            email: format!("{id}@oficina.com"),
            rating,
            review_count: 10,
            photo: None,
            specialties: specialties.iter().map(|s| (*s).to_string()).collect(),
            opens_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            closes_at: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            operating_days: vec![],
        }
    }

    fn ids(shops: &[&Shop]) -> Vec<String> {
        shops.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_normalize_strips_case_and_accents() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("CáRrO"), "carro");
        assert_eq!(normalize("Injeção Eletrônica"), "injecao eletronica");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_contains_normalized() {
        assert!(contains_normalized("Revisão Completa", "REVISAO"));
        assert!(contains_normalized("anything", ""));
        assert!(!contains_normalized("Freios", "pneu"));
    }

    #[test]
    fn test_search_matches_name_address_and_specialty() {
        let mut by_address = make_shop("c", "Gamma", 3.0, &["Pneus"]);
        by_address.address = "Avenida Paulista".into();
        let shops = vec![
            make_shop("a", "Paulista Motors", 4.0, &["Motor"]),
            make_shop("b", "Beta", 5.0, &["Funilaria Paulista"]),
            by_address,
            make_shop("d", "Delta", 2.0, &["Freios"]),
        ];

        let results = search(&shops, "paulista", SortKey::Rating);

        assert_eq!(ids(&results), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_search_rating_sort_is_stable() {
        let shops = vec![
            make_shop("a", "A", 4.5, &["x"]),
            make_shop("b", "B", 4.9, &["x"]),
            make_shop("c", "C", 4.5, &["x"]),
        ];

        let results = search(&shops, "", SortKey::Rating);

        assert_eq!(ids(&results), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_search_name_sort_uses_pt_br_collation() {
        let shops = vec![
            make_shop("1", "Oficina Zé", 4.0, &["x"]),
            make_shop("2", "Ágil Pneus", 4.0, &["x"]),
            make_shop("3", "AutoCar", 4.0, &["x"]),
            make_shop("4", "Bosch Car Service", 4.0, &["x"]),
            make_shop("5", "Élite", 4.0, &["x"]),
        ];

        let results = search(&shops, "", SortKey::Name);

        assert_eq!(ids(&results), vec!["2", "3", "4", "5", "1"]);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let shops = vec![make_shop("a", "Alpha", 4.0, &["Motor"])];

        assert!(search(&shops, "xyz", SortKey::Name).is_empty());
    }

    #[test]
    fn test_compare_pt_br_tie_breaks() {
        assert_eq!(compare_pt_br("e", "é"), Ordering::Less);
        assert_eq!(compare_pt_br("é", "f"), Ordering::Less);
        assert_eq!(compare_pt_br("abc", "Abc"), Ordering::Less);
        assert_eq!(compare_pt_br("São", "são"), Ordering::Greater);
        assert_eq!(compare_pt_br("Mesma", "Mesma"), Ordering::Equal);
    }

    #[test]
    fn test_compare_pt_br_folds_undecomposed_letters() {
        assert_eq!(compare_pt_br("Øster", "Oficina"), Ordering::Greater);
        assert_eq!(compare_pt_br("Øster", "Pneus"), Ordering::Less);
        assert_eq!(compare_pt_br("Æro", "Afonso"), Ordering::Less);
        assert_eq!(compare_pt_br("Straße", "Strasse"), Ordering::Greater);
        assert_eq!(compare_pt_br("Straße", "Strat"), Ordering::Less);
        assert_eq!(compare_pt_br("Đurić", "Eva"), Ordering::Less);
    }

    #[test]
    fn test_compare_pt_br_symbols_and_digits_before_letters() {
        assert_eq!(compare_pt_br("~Oficina", "Auto"), Ordering::Less);
        assert_eq!(compare_pt_br("{Garagem}", "4x4 Off-Road"), Ordering::Less);
        assert_eq!(compare_pt_br("4x4 Off-Road", "Auto"), Ordering::Less);
        assert_eq!(compare_pt_br("Zeta", "~"), Ordering::Greater);
    }

    #[test]
    fn test_search_diacritics_or_whitespace_only_query() {
        let mut spaced = make_shop("b", "Beta", 3.0, &["Freios"]);
        spaced.address = "Rua das Flores, 10".into();
        let shops = vec![make_shop("a", "Alpha", 4.0, &["Motor"]), spaced];

        let marks = search(&shops, "\u{0301}\u{0303}", SortKey::Rating);
        assert_eq!(ids(&marks), vec!["a", "b"]);

        let space = search(&shops, " ", SortKey::Rating);
        assert_eq!(ids(&space), vec!["a", "b"]);
        assert_eq!(normalize(" "), " ");
        assert_eq!(normalize("\u{0301}"), "");
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("rating".parse::<SortKey>(), Ok(SortKey::Rating));
        assert_eq!("Nome".parse::<SortKey>(), Ok(SortKey::Name));
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_view_state_favorites() {
        let shops = vec![
            make_shop("a", "Alpha", 4.0, &["Motor"]),
            make_shop("b", "Beta", 4.8, &["Motor"]),
        ];
        let mut state = ViewState::with_sort(SortKey::Name);

        assert!(state.toggle_favorite("b"));
        assert!(state.is_favorite("b"));
        state.favorites_only = true;
        assert_eq!(ids(&state.results(&shops)), vec!["b"]);

        assert!(!state.toggle_favorite("b"));
        assert!(state.results(&shops).is_empty());
    }

    #[test]
    fn test_view_state_query_and_sort() {
        let shops = vec![
            make_shop("a", "Alpha", 4.0, &["Motor"]),
            make_shop("b", "Beta", 4.8, &["Motor"]),
            make_shop("c", "Gamma", 5.0, &["Pintura"]),
        ];
        let mut state = ViewState::default();

        state.set_query("MOTOR");
        assert_eq!(ids(&state.results(&shops)), vec!["b", "a"]);

        state.set_sort(SortKey::Name);
        assert_eq!(ids(&state.results(&shops)), vec!["a", "b"]);
    }
}
