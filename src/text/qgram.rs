use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

/// Default q-gram length
pub const Q: usize = 3;

/// Padding character, must never occur in a lower cased address token
const PAD: char = '#';

///
/// Memoized q-gram sets keyed by (token, q)
///
/// Tokens recur heavily across a batch so every token is only split once.
/// The cache is Sync: concurrent inserts of the same key race benignly since
/// the computed set is a pure function of the key.
///
#[derive(Debug, Default)]
pub struct QGramCache {
    grams: RwLock<HashMap<(String, usize), Arc<HashSet<String>>>>
}

impl QGramCache {
    pub fn new() -> Self {
        QGramCache::default()
    }

    ///
    /// Return the q-gram set of a single token, computing it on first use
    ///
    pub fn grams(&self, token: &str, q: usize) -> Arc<HashSet<String>> {
        let key = (token.to_string(), q);

        if let Some(grams) = self.grams.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return Arc::clone(grams);
        }

        let grams = Arc::new(qgrams(token, q));

        self.grams
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&grams));

        grams
    }

    pub fn len(&self) -> usize {
        self.grams.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// Compute the padded q-grams of a token
///
/// `roma` with q = 3 is padded to `##roma##` and yields
/// `##r`, `#ro`, `rom`, `oma`, `ma#`, `a##`
///
pub fn qgrams(token: &str, q: usize) -> HashSet<String> {
    let mut grams = HashSet::new();

    if q == 0 {
        return grams;
    }

    let padded: Vec<char> = std::iter::repeat(PAD).take(q - 1)
        .chain(token.chars())
        .chain(std::iter::repeat(PAD).take(q - 1))
        .collect();

    for window in padded.windows(q) {
        grams.insert(window.iter().collect());
    }

    grams
}

///
/// The union of the q-grams of every token of an address
///
#[derive(Debug, Clone, PartialEq)]
pub struct QGram {
    grams: HashSet<String>
}

impl QGram {
    pub fn new<T: AsRef<str>>(tokens: &[T], q: usize, cache: &QGramCache) -> Self {
        let mut grams = HashSet::new();

        for token in tokens {
            grams.extend(cache.grams(token.as_ref(), q).iter().cloned());
        }

        QGram {
            grams: grams
        }
    }

    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    ///
    /// Symmetric overlap coefficient between two q-gram sets
    ///
    /// Averages the share of each set covered by the intersection so a short
    /// set isn't penalized for being compared against a long one.
    /// Returns 0.0 if either set is empty.
    ///
    pub fn matching_quota(&self, other: &QGram) -> f64 {
        if self.grams.is_empty() || other.grams.is_empty() {
            return 0.0;
        }

        let intersection = self.grams.intersection(&other.grams).count() as f64;

        (intersection / self.grams.len() as f64 + intersection / other.grams.len() as f64) / 2.0
    }
}

///
/// Q-gram similarity of two token sequences
///
pub fn similarity<T: AsRef<str>>(a: &[T], b: &[T], q: usize, cache: &QGramCache) -> f64 {
    QGram::new(a, q, cache).matching_quota(&QGram::new(b, q, cache))
}
