use crate::io::record_reader::Algorithm;

/// The fixed result buckets that runs are classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Greedy,
    RandomizedAlpha003,
    RandomizedAlpha004,
    RandomizedAlpha005,
    Reactive,
}

/// Alpha values of the randomized greedy that get a bucket of their own.
const RANDOMIZED_ALPHAS: [(f64, Category); 3] = [
    (0.03, Category::RandomizedAlpha003),
    (0.04, Category::RandomizedAlpha004),
    (0.05, Category::RandomizedAlpha005),
];

impl Category {
    pub const COUNT: usize = 5;

    /// All categories in report column order.
    pub const ALL: [Category; Self::COUNT] = [
        Category::Greedy,
        Category::RandomizedAlpha003,
        Category::RandomizedAlpha004,
        Category::RandomizedAlpha005,
        Category::Reactive,
    ];

    /// Returns the category of a run, or `None` if the run belongs to no bucket.
    /// `alpha` is only consulted for the randomized greedy and has to match exactly.
    pub fn classify(algorithm: Algorithm, alpha: Option<f64>) -> Option<Self> {
        match algorithm {
            Algorithm::Greedy => Some(Self::Greedy),
            Algorithm::Reactive => Some(Self::Reactive),
            Algorithm::Randomized => {
                let alpha = alpha?;
                RANDOMIZED_ALPHAS
                    .iter()
                    .find(|(a, _)| *a == alpha)
                    .map(|(_, category)| *category)
            }
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn algorithm(self) -> Algorithm {
        match self {
            Self::Greedy => Algorithm::Greedy,
            Self::Reactive => Algorithm::Reactive,
            _ => Algorithm::Randomized,
        }
    }

    pub fn alpha(self) -> Option<f64> {
        RANDOMIZED_ALPHAS
            .iter()
            .find(|(_, category)| *category == self)
            .map(|(a, _)| *a)
    }

    /// Name of the value column in both reports.
    pub fn column(self) -> &'static str {
        match self {
            Self::Greedy => "guloso",
            Self::RandomizedAlpha003 => "randomizado_alfa_0.03",
            Self::RandomizedAlpha004 => "randomizado_alfa_0.04",
            Self::RandomizedAlpha005 => "randomizado_alfa_0.05",
            Self::Reactive => "reativo",
        }
    }

    pub fn deviation_column(self) -> String {
        format!("desvio_{}", self.column())
    }

    pub fn time_column(self) -> String {
        format!("tempo_{}", self.column())
    }
}
