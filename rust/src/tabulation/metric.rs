//! Metric kinds used to rank candidates.

use std::fmt;

/// A single ranking criterion. Higher values rank first for every kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Summed window score across all people.
    Score,
    /// Pairwise wins against the other candidates in the current pool.
    RankedRobin,
    /// Number of people averaging more than the five-star threshold.
    FiveStars,
    /// Seeded tiebreak draw; separates anything the other metrics cannot.
    Random,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::RankedRobin => "ranked_robin",
            Self::FiveStars => "five_stars",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric order for the scoring round and the overlap filter.
pub const SCORING_ORDER: [Metric; 4] = [
    Metric::Score,
    Metric::RankedRobin,
    Metric::FiveStars,
    Metric::Random,
];

/// Metric order for the two-candidate runoff.
pub const RUNOFF_ORDER: [Metric; 4] = [
    Metric::RankedRobin,
    Metric::Score,
    Metric::FiveStars,
    Metric::Random,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_end_with_random() {
        assert_eq!(SCORING_ORDER.last(), Some(&Metric::Random));
        assert_eq!(RUNOFF_ORDER.last(), Some(&Metric::Random));
        assert_eq!(SCORING_ORDER[0], Metric::Score);
        assert_eq!(RUNOFF_ORDER[0], Metric::RankedRobin);
    }

    #[test]
    fn test_display() {
        assert_eq!(Metric::RankedRobin.to_string(), "ranked_robin");
        assert_eq!(format!("{}", Metric::FiveStars), "five_stars");
    }
}
