use std::collections::HashMap;
use std::io::BufRead;

use anyhow;
use itertools::Itertools;

use line_format::{Field, Line, LineFormat, ParseStats};

/// Name of the bucket that accumulates every score regardless of template.
pub const ALL_SCORES: &'static str = "All";

/// Likelihood scores grouped per template, in input order, alongside the
/// `All` bucket holding the union.
pub struct TemplateScores(HashMap<String, Vec<f64>>);

impl TemplateScores {
    pub fn collect<R: BufRead>(
        format: &LineFormat,
        input: R,
        stats: &mut ParseStats,
    ) -> Result<Self, anyhow::Error> {
        format.require(Field::Likelihood)?;

        let mut scores: HashMap<String, Vec<f64>> = HashMap::new();
        scores.insert(ALL_SCORES.to_string(), Vec::new());

        for line_res in input.lines() {
            let line = line_res?;
            match format.classify(&line) {
                Line::Record(record) => {
                    stats.records += 1;
                    if let Some(score) = record.likelihood {
                        if let Some(bucket) = scores.get_mut(ALL_SCORES) {
                            bucket.push(score);
                        }
                        if let Some(template) = record.template {
                            scores.entry(template).or_insert_with(Vec::new).push(score);
                        }
                    }
                }
                Line::Skip(skip) => stats.count_skip(&skip),
            }
        }

        Ok(TemplateScores(scores))
    }

    pub fn get(&self, bucket: &str) -> Option<&[f64]> {
        self.0.get(bucket).map(|scores| scores.as_slice())
    }

    pub fn buckets(&self) -> Vec<&str> {
        self.0.keys().map(|name| name.as_str()).sorted().collect()
    }

    pub fn score_map(self) -> HashMap<String, Vec<f64>> {
        self.0
    }
}
