use std::collections::HashMap;
use std::io::BufRead;

use anyhow;
use itertools::Itertools;

use line_format::{Field, Line, LineFormat, ParseStats};

/// Runner-up likelihoods keyed by `(group winner, runner-up template)`.
///
/// Groups are maximal runs of well-formed records; any skipped line ends
/// the current group. Within a group the winner is the record with the
/// highest likelihood, keeping the first on ties, and every other record
/// contributes its score under its own template name.
pub struct RelativeScores(HashMap<(String, String), Vec<f64>>);

impl RelativeScores {
    pub fn collect<R: BufRead>(
        format: &LineFormat,
        input: R,
        stats: &mut ParseStats,
    ) -> Result<Self, anyhow::Error> {
        format.require(Field::Template)?;
        format.require(Field::Likelihood)?;

        let mut relative = HashMap::new();
        let mut group: Vec<(String, f64)> = Vec::new();

        for line_res in input.lines() {
            let line = line_res?;
            match format.classify(&line) {
                Line::Record(record) => {
                    stats.records += 1;
                    if let (Some(template), Some(score)) =
                        (record.template, record.likelihood)
                    {
                        group.push((template, score));
                    }
                }
                Line::Skip(skip) => {
                    stats.count_skip(&skip);
                    flush_group(&mut relative, &mut group);
                }
            }
        }
        // A group only flushes when a separator line follows it, so records
        // after the last separator are dropped.
        // TODO: flush the trailing group at end of input as well.

        Ok(RelativeScores(relative))
    }

    pub fn get(&self, winner: &str, other: &str) -> Option<&[f64]> {
        self.0
            .get(&(winner.to_string(), other.to_string()))
            .map(|scores| scores.as_slice())
    }

    pub fn winners(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(|key| key.0.as_str())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn others(&self, winner: &str) -> Vec<(&str, &[f64])> {
        self.0
            .iter()
            .filter(|&(key, _)| key.0 == winner)
            .map(|(key, scores)| (key.1.as_str(), scores.as_slice()))
            .sorted_by(|a, b| a.0.cmp(b.0))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn flush_group(
    relative: &mut HashMap<(String, String), Vec<f64>>,
    group: &mut Vec<(String, f64)>,
) {
    if group.is_empty() {
        return;
    }

    let mut winner = 0;
    for (i, &(_, score)) in group.iter().enumerate() {
        if score > group[winner].1 {
            winner = i;
        }
    }

    let winner_name = group[winner].0.clone();
    for (i, &(ref other, score)) in group.iter().enumerate() {
        if i == winner {
            continue;
        }
        let pair_scores = relative
            .entry((winner_name.clone(), other.clone()))
            .or_insert_with(Vec::new);
        pair_scores.push(score);
    }

    group.clear();
}
