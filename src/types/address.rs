use std::collections::{BTreeSet, HashMap};
use std::fmt;
use crate::text::{self, qgram, QGramCache, Q};
use crate::types::{MatchResult, MatchTier, StreetTypes};

lazy_static! {
    static ref QGRAMS: QGramCache = QGramCache::new();
}

///
/// A postal address normalized into an optional street type, the ordered
/// name tokens and an optional house number
///
/// `Via Roma, 012` is parsed into type `via`, tokens `[roma]`, number `12`
///
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    /// Opaque identifier supplied by the caller
    pub unique_id: Option<String>,

    /// Raw input, only retained for display
    pub original: String,

    /// Lower cased name tokens, excluding the type and number tokens
    pub tokens: Vec<String>,

    /// Street type label from the vocabulary
    pub address_type: Option<String>,

    /// House number with leading zeros removed
    pub address_number: Option<String>
}

impl Address {
    pub fn new(unique_id: Option<String>, original: impl Into<String>, street_types: &StreetTypes) -> Self {
        let original = original.into();
        let mut tokens = text::tokenize(&original);

        let address_type = match tokens.first() {
            Some(first) => street_types.identify(first).map(String::from),
            None => None
        };
        if address_type.is_some() {
            tokens.remove(0);
        }

        let address_number = match tokens.last() {
            Some(last) => text::str_normalize_number(last),
            None => None
        };
        if address_number.is_some() {
            tokens.pop();
        }

        Address {
            unique_id: unique_id,
            original: original,
            tokens: tokens,
            address_type: address_type,
            address_number: address_number
        }
    }

    ///
    /// Parse an address without a street type vocabulary, no type is ever identified
    ///
    pub fn from_raw(unique_id: Option<String>, original: impl Into<String>) -> Self {
        Address::new(unique_id, original, &StreetTypes::default())
    }

    ///
    /// Build an address from a tabular record, a missing id column yields no id
    /// and a missing address column yields an empty address
    ///
    pub fn from_record(record: &HashMap<String, String>, id_column: &str, addr_column: &str, street_types: &StreetTypes) -> Self {
        let original = record.get(addr_column).cloned().unwrap_or_default();

        Address::new(record.get(id_column).cloned(), original, street_types)
    }

    pub fn has_type(&self) -> bool {
        self.address_type.is_some()
    }

    pub fn has_number(&self) -> bool {
        self.address_number.is_some()
    }

    /// Only a number present on self can agree
    fn number_agrees(&self, other: &Address) -> bool {
        self.has_number() && self.address_number == other.address_number
    }

    ///
    /// Compare two addresses, falling back to a fuzzy comparison
    /// only if no perfect match was found
    ///
    /// Uses the process wide q-gram cache
    ///
    pub fn compare(&self, other: &Address) -> MatchResult {
        self.compare_with(other, &QGRAMS)
    }

    pub fn compare_with(&self, other: &Address, cache: &QGramCache) -> MatchResult {
        let perfect = self.compare_perfect(other);

        if perfect.is_match() {
            perfect
        } else {
            self.compare_fuzzy(other, cache)
        }
    }

    ///
    /// The strongest of the strict and unordered comparisons, NO or an A tier
    ///
    pub fn compare_perfect(&self, other: &Address) -> MatchResult {
        let strict = self.compare_strict(other);
        if strict.tier == MatchTier::A1 {
            return strict;
        }

        let unordered = self.compare_unordered(other);
        if unordered.outranks(&strict) {
            unordered
        } else {
            strict
        }
    }

    ///
    /// Type, tokens (position-wise) and number must agree, returns NO, A1 or A3
    ///
    pub fn compare_strict(&self, other: &Address) -> MatchResult {
        if self.address_type != other.address_type || self.tokens != other.tokens {
            return MatchResult::no_match();
        }

        if self.number_agrees(other) {
            MatchResult::exact(MatchTier::A1)
        } else {
            MatchResult::exact(MatchTier::A3)
        }
    }

    ///
    /// Tokens are compared as sets, differing tokens may still be reconciled
    /// by resolving abbreviations against long names. Returns NO, A2 or A4
    ///
    /// Via A. Volta == Via Volta Alessandro
    ///
    pub fn compare_unordered(&self, other: &Address) -> MatchResult {
        let self_set: BTreeSet<&str> = self.tokens.iter().map(String::as_str).collect();
        let other_set: BTreeSet<&str> = other.tokens.iter().map(String::as_str).collect();

        if self_set.is_disjoint(&other_set)
            || self.address_type != other.address_type
            || self_set.len() != other_set.len()
        {
            return MatchResult::no_match();
        }

        let self_diff: BTreeSet<&str> = self_set.difference(&other_set).cloned().collect();
        let other_diff: BTreeSet<&str> = other_set.difference(&self_set).cloned().collect();

        let (self_rest, other_rest) = match match_short_names(self_diff, other_diff) {
            Some(rest) => rest,
            None => return MatchResult::no_match()
        };
        let (other_rest, self_rest) = match match_short_names(other_rest, self_rest) {
            Some(rest) => rest,
            None => return MatchResult::no_match()
        };

        if !self_rest.is_empty() || !other_rest.is_empty() {
            return MatchResult::no_match();
        }

        if self.number_agrees(other) {
            MatchResult::exact(MatchTier::A2)
        } else {
            MatchResult::exact(MatchTier::A4)
        }
    }

    ///
    /// Never returns NO: B1 if the numbers agree else B2, with a quality made of
    ///
    /// - 0.10 if the types agree
    /// - 0.10 if the numbers agree
    /// - 0.80 * the q-gram similarity of the tokens
    ///
    pub fn compare_fuzzy(&self, other: &Address, cache: &QGramCache) -> MatchResult {
        let mut tier = MatchTier::B2;
        let mut quality = 0.0;

        if self.has_type() && self.address_type == other.address_type {
            quality += 0.10;
        }

        if self.number_agrees(other) {
            quality += 0.10;
            tier = MatchTier::B1;
        }

        quality += qgram::similarity(&self.tokens, &other.tokens, Q, cache) * 0.80;

        MatchResult::new(tier, quality)
    }
}

///
/// Resolve every abbreviation like `a.` in `short` against the first unused token
/// of `long` starting with its letters, ie: `a.` => `alcide`
///
/// Both sets are walked in lexicographic order. Returns what is left of each set
/// once matched pairs are removed, or None as soon as an abbreviation has no
/// unused long form left.
///
fn match_short_names<'a>(short: BTreeSet<&'a str>, mut long: BTreeSet<&'a str>) -> Option<(BTreeSet<&'a str>, BTreeSet<&'a str>)> {
    let mut unmatched: BTreeSet<&'a str> = BTreeSet::new();

    for token in short {
        let initials = match text::is_short_name(token) {
            Some(initials) => initials,
            None => {
                unmatched.insert(token);
                continue;
            }
        };

        let candidate = long.iter().find(|candidate| candidate.starts_with(initials)).cloned()?;
        long.remove(candidate);
    }

    Some((unmatched, long))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let display = format!("{} {} {}",
            self.address_type.as_ref().map(String::as_str).unwrap_or(""),
            self.tokens.join(" "),
            self.address_number.as_ref().map(String::as_str).unwrap_or("")
        );

        f.write_str(display.trim())
    }
}
