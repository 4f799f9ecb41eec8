use std::collections::BTreeMap;

use tracing::debug;

use super::category::Category;
use crate::io::{optimal_reader::OptimalLookup, record_reader::RunRecord};

/// Which solution values enter the average report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AveragePolicy {
    /// Every run with a solution value.
    #[default]
    AllSolutions,
    /// Only runs that also recorded an elapsed time.
    TimedRunsOnly,
}

/// Raw values observed for one instance in one category.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Samples {
    solutions: Vec<f64>,
    times: Vec<f64>,
    timed_solutions: Vec<f64>,
}

impl Samples {
    pub fn push(&mut self, solution: f64, elapsed: Option<f64>) {
        self.solutions.push(solution);
        if let Some(elapsed) = elapsed {
            self.times.push(elapsed);
            self.timed_solutions.push(solution);
        }
    }

    pub fn solutions(&self) -> &[f64] {
        &self.solutions
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn best(&self) -> Option<f64> {
        minimum(&self.solutions)
    }

    pub fn mean_solution(&self, policy: AveragePolicy) -> Option<f64> {
        match policy {
            AveragePolicy::AllSolutions => mean(&self.solutions),
            AveragePolicy::TimedRunsOnly => mean(&self.timed_solutions),
        }
    }

    /// Mean over the runs that recorded a time; not aligned with the solution list.
    pub fn mean_time(&self) -> Option<f64> {
        mean(&self.times)
    }
}

// keeps the earlier value unless a later one is strictly smaller
fn minimum(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .reduce(|best, x| if x < best { x } else { best })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InstanceAggregate {
    pub optimal: Option<f64>,
    samples: [Samples; Category::COUNT],
}

impl InstanceAggregate {
    pub fn new(optimal: Option<f64>) -> Self {
        Self {
            optimal,
            samples: Default::default(),
        }
    }

    pub fn samples(&self, category: Category) -> &Samples {
        &self.samples[category.index()]
    }

    pub fn samples_mut(&mut self, category: Category) -> &mut Samples {
        &mut self.samples[category.index()]
    }
}

/// What happened to a single record during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
    Categorized(Category),
    NoSolution,
    Uncategorized,
}

/// Per-instance aggregates, ordered by instance identifier.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultTable {
    instances: BTreeMap<String, InstanceAggregate>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `records` in a single pass. The first error aborts.
    pub fn from_records<E>(
        records: impl IntoIterator<Item = Result<RunRecord, E>>,
        lookup: &mut impl OptimalLookup,
    ) -> Result<Self, E> {
        let mut table = Self::new();
        for record in records {
            table.ingest(record?, lookup);
        }
        Ok(table)
    }

    /// Adds one record. The optimal value of an instance is looked up when the instance is
    /// first seen, even if the record itself carries no solution.
    pub fn ingest(&mut self, record: RunRecord, lookup: &mut impl OptimalLookup) -> Ingested {
        let RunRecord {
            instance,
            algorithm,
            alpha,
            solution,
            elapsed,
        } = record;

        let aggregate = self
            .instances
            .entry(instance.clone())
            .or_insert_with(|| InstanceAggregate::new(lookup.lookup(&instance)));

        let Some(solution) = solution else {
            return Ingested::NoSolution;
        };

        let Some(category) = algorithm.and_then(|a| Category::classify(a, alpha)) else {
            debug!("Dropped run of {instance}: algorithm {algorithm:?}, alpha {alpha:?}");
            return Ingested::Uncategorized;
        };

        aggregate.samples_mut(category).push(solution, elapsed);
        Ingested::Categorized(category)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, instance: &str) -> Option<&InstanceAggregate> {
        self.instances.get(instance)
    }

    /// Instances in ascending order of their identifier.
    pub fn instances(&self) -> impl Iterator<Item = (&str, &InstanceAggregate)> {
        self.instances.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::io::record_reader::Algorithm;

    fn run(
        instance: &str,
        algorithm: Algorithm,
        alpha: Option<f64>,
        solution: Option<f64>,
        elapsed: Option<f64>,
    ) -> RunRecord {
        RunRecord {
            instance: instance.into(),
            algorithm: Some(algorithm),
            alpha,
            solution,
            elapsed,
        }
    }

    /// Lookup that answers from a map and counts how often each instance was queried.
    #[derive(Default)]
    struct CountingLookup {
        optima: HashMap<String, f64>,
        calls: HashMap<String, usize>,
    }

    impl OptimalLookup for CountingLookup {
        fn lookup(&mut self, instance: &str) -> Option<f64> {
            *self.calls.entry(instance.to_string()).or_default() += 1;
            self.optima.get(instance).copied()
        }
    }

    #[test]
    fn samples_statistics() {
        let mut samples = Samples::default();
        assert!(samples.is_empty());
        assert_eq!(samples.best(), None);
        assert_eq!(samples.mean_solution(AveragePolicy::AllSolutions), None);
        assert_eq!(samples.mean_time(), None);

        samples.push(10.0, Some(1.0));
        samples.push(4.0, None);
        samples.push(7.0, Some(2.0));

        assert_eq!(samples.solutions(), &[10.0, 4.0, 7.0]);
        assert_eq!(samples.times(), &[1.0, 2.0]);
        assert_eq!(samples.best(), Some(4.0));
        assert_eq!(samples.mean_solution(AveragePolicy::AllSolutions), Some(7.0));
        assert_eq!(samples.mean_solution(AveragePolicy::TimedRunsOnly), Some(8.5));
        assert_eq!(samples.mean_time(), Some(1.5));
    }

    #[test]
    fn timed_runs_only_without_times() {
        let mut samples = Samples::default();
        samples.push(3.0, None);
        assert_eq!(samples.best(), Some(3.0));
        assert_eq!(samples.mean_solution(AveragePolicy::TimedRunsOnly), None);
    }

    #[test]
    fn optimal_is_looked_up_once_per_instance() {
        let mut lookup = CountingLookup::default();
        lookup.optima.insert("I1".into(), 80.0);

        let mut table = ResultTable::new();
        table.ingest(run("I1", Algorithm::Greedy, None, None, None), &mut lookup);
        table.ingest(run("I2", Algorithm::Greedy, None, Some(5.0), None), &mut lookup);
        table.ingest(run("I1", Algorithm::Greedy, None, Some(100.0), None), &mut lookup);
        lookup.optima.insert("I2".into(), 1.0);
        table.ingest(run("I2", Algorithm::Reactive, None, Some(4.0), None), &mut lookup);

        assert_eq!(lookup.calls["I1"], 1);
        assert_eq!(lookup.calls["I2"], 1);
        assert_eq!(table.get("I1").unwrap().optimal, Some(80.0));
        assert_eq!(table.get("I2").unwrap().optimal, None);
    }

    #[test]
    fn row_without_solution_only_registers_instance() {
        let mut lookup = CountingLookup::default();
        let mut table = ResultTable::new();

        let outcome = table.ingest(
            run("I1", Algorithm::Greedy, None, None, Some(3.0)),
            &mut lookup,
        );

        assert_eq!(outcome, Ingested::NoSolution);
        assert_eq!(lookup.calls["I1"], 1);
        let aggregate = table.get("I1").unwrap();
        for c in Category::ALL {
            assert!(aggregate.samples(c).is_empty());
            assert!(aggregate.samples(c).times().is_empty());
        }
    }

    #[test]
    fn uncategorized_runs_are_dropped() {
        let mut lookup = |_: &str| None::<f64>;
        let mut table = ResultTable::new();

        let outcomes = [
            table.ingest(run("I1", Algorithm::Randomized, Some(0.07), Some(1.0), None), &mut lookup),
            table.ingest(run("I1", Algorithm::Randomized, None, Some(1.0), None), &mut lookup),
            table.ingest(
                RunRecord {
                    instance: "I1".into(),
                    algorithm: None,
                    alpha: None,
                    solution: Some(1.0),
                    elapsed: Some(1.0),
                },
                &mut lookup,
            ),
            table.ingest(run("I1", Algorithm::Randomized, Some(0.05), Some(2.0), None), &mut lookup),
        ];

        assert_eq!(
            outcomes,
            [
                Ingested::Uncategorized,
                Ingested::Uncategorized,
                Ingested::Uncategorized,
                Ingested::Categorized(Category::RandomizedAlpha005)
            ]
        );

        let aggregate = table.get("I1").unwrap();
        assert_eq!(aggregate.samples(Category::RandomizedAlpha005).solutions(), &[2.0]);
        for c in [
            Category::Greedy,
            Category::RandomizedAlpha003,
            Category::RandomizedAlpha004,
            Category::Reactive,
        ] {
            assert!(aggregate.samples(c).is_empty());
        }
    }

    #[test]
    fn instances_are_sorted() {
        let mut lookup = |_: &str| None::<f64>;
        let records = ["b", "a", "B", "a", "c10", "c2"]
            .into_iter()
            .map(|i| Ok::<_, ()>(run(i, Algorithm::Greedy, None, Some(1.0), None)));

        let table = ResultTable::from_records(records, &mut lookup).unwrap();
        let ids: Vec<_> = table.instances().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["B", "a", "b", "c10", "c2"]);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn from_records_stops_at_first_error() {
        let mut calls = 0;
        let mut lookup = |_: &str| -> Option<f64> {
            calls += 1;
            None
        };
        let records = vec![
            Ok(run("I1", Algorithm::Greedy, None, Some(1.0), None)),
            Err("broken row"),
            Ok(run("I2", Algorithm::Greedy, None, Some(1.0), None)),
        ];

        assert_eq!(
            ResultTable::from_records(records, &mut lookup),
            Err("broken row")
        );
        assert_eq!(calls, 1);
    }
}
