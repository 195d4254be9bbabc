use std::cmp::Ordering;
use std::fmt;

///
/// Match tier of a comparison between two addresses
///
/// The letter denotes the family (A: exact/structural, B: fuzzy), the digit a
/// sub level where lower is stronger.
///
/// - NO: no match
/// - A1: perfect match
/// - A2: unordered perfect match
/// - A3: perfect match without number
/// - A4: unordered perfect match without number
/// - B1: fuzzy match with number
/// - B2: fuzzy match
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchTier {
    #[serde(rename = "NO")]
    No,
    A1,
    A2,
    A3,
    A4,
    B1,
    B2
}

/// Ordered weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Family {
    No,
    Fuzzy,
    Exact
}

impl MatchTier {
    pub fn family(self) -> Family {
        match self {
            MatchTier::No => Family::No,
            MatchTier::A1 | MatchTier::A2 | MatchTier::A3 | MatchTier::A4 => Family::Exact,
            MatchTier::B1 | MatchTier::B2 => Family::Fuzzy
        }
    }

    /// Numeric sub level, 0 for NO
    pub fn level(self) -> u8 {
        match self {
            MatchTier::No => 0,
            MatchTier::A1 | MatchTier::B1 => 1,
            MatchTier::A2 | MatchTier::B2 => 2,
            MatchTier::A3 => 3,
            MatchTier::A4 => 4
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchTier::No => "NO",
            MatchTier::A1 => "A1",
            MatchTier::A2 => "A2",
            MatchTier::A3 => "A3",
            MatchTier::A4 => "A4",
            MatchTier::B1 => "B1",
            MatchTier::B2 => "B2"
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub tier: MatchTier,

    /// Always 1.0 for A tiers, continuous in [0, 1] for B tiers
    pub quality: f64
}

impl MatchResult {
    pub fn new(tier: MatchTier, quality: f64) -> Self {
        MatchResult {
            tier: tier,
            quality: quality
        }
    }

    pub fn no_match() -> Self {
        MatchResult::new(MatchTier::No, 0.0)
    }

    /// Exact tiers are always fully confident
    pub fn exact(tier: MatchTier) -> Self {
        MatchResult::new(tier, 1.0)
    }

    pub fn is_match(&self) -> bool {
        self.tier != MatchTier::No
    }

    ///
    /// Rank two results against each other
    ///
    /// - NO is weaker than everything else
    /// - any A tier beats any B tier regardless of level or quality
    /// - within a family the lower level wins: A1 > A2 > A3 > A4, B1 > B2
    /// - quality only breaks ties between B results of the same level
    ///
    pub fn rank_cmp(&self, other: &MatchResult) -> Ordering {
        let family = self.tier.family();

        family.cmp(&other.tier.family())
            .then_with(|| other.tier.level().cmp(&self.tier.level()))
            .then_with(|| match family {
                Family::Fuzzy => self.quality.total_cmp(&other.quality),
                _ => Ordering::Equal
            })
    }

    pub fn outranks(&self, other: &MatchResult) -> bool {
        self.rank_cmp(other) == Ordering::Greater
    }

    ///
    /// Return the candidate with the strongest result, the first one seen wins ties
    ///
    pub fn best<T, I>(candidates: I) -> Option<(T, MatchResult)>
        where I: IntoIterator<Item = (T, MatchResult)>
    {
        let mut best: Option<(T, MatchResult)> = None;

        for (candidate, result) in candidates {
            best = match best {
                Some((current, current_result)) if !result.outranks(&current_result) => Some((current, current_result)),
                _ => Some((candidate, result))
            };
        }

        best
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}%", self.tier, (self.quality * 100.0) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<MatchResult> {
        vec![
            MatchResult::no_match(),
            MatchResult::exact(MatchTier::A1),
            MatchResult::exact(MatchTier::A2),
            MatchResult::exact(MatchTier::A3),
            MatchResult::exact(MatchTier::A4),
            MatchResult::new(MatchTier::B1, 0.1),
            MatchResult::new(MatchTier::B1, 0.9),
            MatchResult::new(MatchTier::B2, 0.0),
            MatchResult::new(MatchTier::B2, 1.0),
        ]
    }

    #[test]
    fn test_family_outranks_level() {
        let a4 = MatchResult::exact(MatchTier::A4);
        let b1 = MatchResult::new(MatchTier::B1, 1.0);

        assert_eq!(a4.rank_cmp(&b1), Ordering::Greater);
        assert_eq!(b1.rank_cmp(&a4), Ordering::Less);
        assert!(b1.outranks(&MatchResult::no_match()));
    }

    #[test]
    fn test_levels() {
        let a = [MatchTier::A1, MatchTier::A2, MatchTier::A3, MatchTier::A4];
        for pair in a.windows(2) {
            assert!(MatchResult::exact(pair[0]).outranks(&MatchResult::exact(pair[1])));
        }

        // level beats quality across B levels
        assert!(MatchResult::new(MatchTier::B1, 0.1).outranks(&MatchResult::new(MatchTier::B2, 0.9)));

        // quality breaks ties within a B level
        assert!(MatchResult::new(MatchTier::B2, 0.6).outranks(&MatchResult::new(MatchTier::B2, 0.5)));
        assert_eq!(
            MatchResult::new(MatchTier::B2, 0.5).rank_cmp(&MatchResult::new(MatchTier::B2, 0.5)),
            Ordering::Equal
        );

        // quality is ignored for A tiers and NO
        assert_eq!(
            MatchResult::new(MatchTier::A2, 1.0).rank_cmp(&MatchResult::new(MatchTier::A2, 0.3)),
            Ordering::Equal
        );
        assert_eq!(
            MatchResult::new(MatchTier::No, 0.0).rank_cmp(&MatchResult::new(MatchTier::No, 0.7)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_total_order() {
        let results = all();

        for a in &results {
            for b in &results {
                // exactly one of >, <, == holds and it's antisymmetric
                assert_eq!(a.rank_cmp(b), b.rank_cmp(a).reverse());

                for c in &results {
                    if a.rank_cmp(b) != Ordering::Less && b.rank_cmp(c) != Ordering::Less {
                        assert_ne!(a.rank_cmp(c), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn test_best() {
        assert_eq!(MatchResult::best(Vec::<(usize, MatchResult)>::new()), None);
        assert_eq!(
            MatchResult::best(all().into_iter().enumerate()),
            Some((1, MatchResult::exact(MatchTier::A1)))
        );

        // first seen wins ties
        let first = MatchResult::new(MatchTier::A3, 1.0);
        let second = MatchResult::new(MatchTier::A3, 0.5);
        assert_eq!(MatchResult::best(vec![("first", first), ("second", second)]), Some(("first", first)));

        let low = MatchResult::new(MatchTier::B2, 0.3);
        let high = MatchResult::new(MatchTier::B2, 0.7);
        assert_eq!(MatchResult::best(vec![("low", low), ("high", high)]), Some(("high", high)));
    }

    #[test]
    fn test_display() {
        assert_eq!(MatchResult::exact(MatchTier::A1).to_string(), String::from("A1: 100%"));
        assert_eq!(MatchResult::new(MatchTier::B2, 0.456).to_string(), String::from("B2: 45%"));
        assert_eq!(MatchResult::no_match().to_string(), String::from("NO: 0%"));
    }
}
