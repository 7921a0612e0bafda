//! Benchmark-cohort expectations: median for numeric variables, mode for categorical ones.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use super::domain::{
    AssessmentRecord, AssessmentValue, BenchmarkSet, ScoringDirection, TalentGroup,
};

/// Expected value of one (group, variable, direction) triple over the benchmark cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkBaseline {
    pub group: TalentGroup,
    pub variable: String,
    pub direction: ScoringDirection,
    pub baseline_numeric: Option<f64>,
    pub baseline_categorical: Option<String>,
}

impl BenchmarkBaseline {
    /// Numeric baseline when present, otherwise the modal category.
    pub fn display(&self) -> Option<String> {
        self.baseline_numeric
            .map(|value| value.to_string())
            .or_else(|| self.baseline_categorical.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct BaselineKey {
    group: TalentGroup,
    variable: String,
    direction: ScoringDirection,
}

impl BaselineKey {
    fn of(record: &AssessmentRecord) -> Self {
        Self {
            group: record.group(),
            variable: record.variable().to_string(),
            direction: record.direction(),
        }
    }
}

/// Baselines of one analysis run, ordered by group, variable, then direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineTable {
    entries: BTreeMap<BaselineKey, BenchmarkBaseline>,
}

impl BaselineTable {
    /// Baseline a record is scored against, if the benchmark cohort observed it.
    pub fn for_record(&self, record: &AssessmentRecord) -> Option<&BenchmarkBaseline> {
        self.entries.get(&BaselineKey::of(record))
    }

    pub fn get(
        &self,
        group: TalentGroup,
        variable: &str,
        direction: ScoringDirection,
    ) -> Option<&BenchmarkBaseline> {
        self.entries.get(&BaselineKey {
            group,
            variable: variable.to_string(),
            direction,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkBaseline> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for BaselineTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

#[derive(Default)]
struct Observations {
    numeric: Vec<f64>,
    categorical: BTreeMap<String, usize>,
}

/// Compute one baseline per triple observed among benchmark employees' records.
///
/// Triples no benchmark employee has produce no entry; callers skip them.
pub fn compute_baselines(records: &[AssessmentRecord], benchmark: &BenchmarkSet) -> BaselineTable {
    let mut observed: BTreeMap<BaselineKey, Observations> = BTreeMap::new();

    for record in records
        .iter()
        .filter(|record| benchmark.contains(record.employee_id()))
    {
        let slot = observed.entry(BaselineKey::of(record)).or_default();
        match record.value() {
            AssessmentValue::Numeric(value) => slot.numeric.push(*value),
            AssessmentValue::Categorical(label) => {
                *slot.categorical.entry(label.clone()).or_insert(0) += 1;
            }
        }
    }

    let entries: BTreeMap<BaselineKey, BenchmarkBaseline> = observed
        .into_iter()
        .map(|(key, mut observations)| {
            let baseline = BenchmarkBaseline {
                group: key.group,
                variable: key.variable.clone(),
                direction: key.direction,
                baseline_numeric: median(&mut observations.numeric),
                baseline_categorical: mode(&observations.categorical),
            };
            (key, baseline)
        })
        .collect();

    debug!(
        baselines = entries.len(),
        benchmark = benchmark.len(),
        "computed benchmark baselines"
    );

    BaselineTable { entries }
}

/// 50th percentile with linear interpolation between order statistics.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let rank = 0.5 * (values.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(values[lower] + (values[upper] - values[lower]) * fraction)
}

/// Most frequent label; ties go to the smallest label in sort order.
fn mode(counts: &BTreeMap<String, usize>) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;
    for (label, count) in counts {
        match best {
            Some((_, best_count)) if *count <= best_count => {}
            _ => best = Some((label, *count)),
        }
    }
    best.map(|(label, _)| label.clone())
}

#[cfg(test)]
pub(crate) fn mode_for_tests<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    mode(&counts)
}
