//! Best-case and average-case summaries of a [`ResultTable`].
//!
//! Both reports have one row per instance, in ascending order of the identifier, and one group
//! of columns per [`Category`]. The best report lists the minimum solution of each category, the
//! average report the mean solution and mean elapsed time. Every value is accompanied by its
//! percentage deviation from the instance's optimal value.

pub mod format;

use crate::aggregate::{AveragePolicy, Category, InstanceAggregate, ResultTable};
use self::format::{format_time, format_value};

pub const INSTANCE_HEADER: &str = "instancia";
pub const OPTIMAL_HEADER: &str = "resultado_ideal";

/// Percentage deviation of `value` from `optimal`; absent if either is absent or the optimum is
/// zero.
pub fn deviation(value: Option<f64>, optimal: Option<f64>) -> Option<f64> {
    let (value, optimal) = (value?, optimal?);
    (optimal != 0.0).then(|| (value - optimal) / optimal * 100.0)
}

/// A fully rendered table: a header and rows of the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BestCell {
    pub best: Option<f64>,
    pub deviation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestRow {
    pub instance: String,
    pub optimal: Option<f64>,
    pub cells: [BestCell; Category::COUNT],
}

impl BestRow {
    pub fn new(instance: &str, aggregate: &InstanceAggregate) -> Self {
        let optimal = aggregate.optimal;
        let cells = Category::ALL.map(|c| {
            let best = aggregate.samples(c).best();
            BestCell {
                best,
                deviation: deviation(best, optimal),
            }
        });

        Self {
            instance: instance.to_string(),
            optimal,
            cells,
        }
    }

    pub fn header() -> Vec<String> {
        let mut header = vec![INSTANCE_HEADER.to_string(), OPTIMAL_HEADER.to_string()];
        for c in Category::ALL {
            header.push(c.column().to_string());
            header.push(c.deviation_column());
        }
        header
    }

    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.instance.clone(), format_value(self.optimal)];
        for cell in &self.cells {
            fields.push(format_value(cell.best));
            fields.push(format_value(cell.deviation));
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AverageCell {
    pub mean: Option<f64>,
    pub deviation: Option<f64>,
    pub mean_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AverageRow {
    pub instance: String,
    pub optimal: Option<f64>,
    pub cells: [AverageCell; Category::COUNT],
}

impl AverageRow {
    pub fn new(instance: &str, aggregate: &InstanceAggregate, policy: AveragePolicy) -> Self {
        let optimal = aggregate.optimal;
        let cells = Category::ALL.map(|c| {
            let samples = aggregate.samples(c);
            let mean = samples.mean_solution(policy);
            AverageCell {
                mean,
                deviation: deviation(mean, optimal),
                mean_time: samples.mean_time(),
            }
        });

        Self {
            instance: instance.to_string(),
            optimal,
            cells,
        }
    }

    pub fn header() -> Vec<String> {
        let mut header = vec![INSTANCE_HEADER.to_string(), OPTIMAL_HEADER.to_string()];
        for c in Category::ALL {
            header.push(c.column().to_string());
            header.push(c.deviation_column());
            header.push(c.time_column());
        }
        header
    }

    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.instance.clone(), format_value(self.optimal)];
        for cell in &self.cells {
            fields.push(format_value(cell.mean));
            fields.push(format_value(cell.deviation));
            fields.push(format_time(cell.mean_time));
        }
        fields
    }
}

pub fn best_report(table: &ResultTable) -> Report {
    Report {
        header: BestRow::header(),
        rows: table
            .instances()
            .map(|(instance, aggregate)| BestRow::new(instance, aggregate).fields())
            .collect(),
    }
}

pub fn average_report(table: &ResultTable, policy: AveragePolicy) -> Report {
    Report {
        header: AverageRow::header(),
        rows: table
            .instances()
            .map(|(instance, aggregate)| AverageRow::new(instance, aggregate, policy).fields())
            .collect(),
    }
}
