use std::collections::HashMap;
use std::io::BufRead;
use std::io::Write;
use std::iter::FromIterator;

use anyhow;
use itertools::Itertools;

use line_format::{Field, Line, LineFormat, ParseStats};

pub struct TagCounts(HashMap<String, usize>);

impl TagCounts {
    pub fn count_map(self) -> HashMap<String, usize> {
        self.0
    }

    pub fn tally<R: BufRead>(
        format: &LineFormat,
        min_likelihood: Option<f64>,
        input: R,
        stats: &mut ParseStats,
    ) -> Result<Self, anyhow::Error> {
        format.require(Field::Id)?;

        let mut counts = HashMap::new();

        for line_res in input.lines() {
            let line = line_res?;
            match format.classify(&line) {
                Line::Record(record) => {
                    stats.records += 1;
                    if let (Some(min), Some(score)) = (min_likelihood, record.likelihood) {
                        if score < min {
                            continue;
                        }
                    }
                    if let Some(id) = record.id {
                        let tag_count = counts.entry(id).or_insert(0);
                        *tag_count += 1;
                    }
                }
                Line::Skip(skip) => stats.count_skip(&skip),
            }
        }

        Ok(TagCounts(counts))
    }

    pub fn get(&self, tag: &str) -> usize {
        self.0.get(tag).map_or(0, |ct| *ct)
    }

    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn count_dist(&self) -> CountDist {
        let max = self.0.values().cloned().max().unwrap_or(0);
        let mut dist = vec![0; max];
        for &count in self.0.values() {
            dist[count - 1] += 1;
        }
        CountDist(dist)
    }

    pub fn write_table<W: Write>(&self, tag_out: W) -> Result<(), anyhow::Error> {
        let mut out = std::io::BufWriter::new(tag_out);

        for tag in self.0.keys().sorted() {
            write!(out, "{}\t{}\n", tag, self.0.get(tag).unwrap_or(&0))?;
        }

        Ok(())
    }

    pub fn write_freq_table<W: Write>(&self, freq_out: W) -> Result<(), anyhow::Error> {
        let mut out = std::io::BufWriter::new(freq_out);

        let mut freq_counts = HashMap::new();

        for count in self.0.values() {
            let freq_count = freq_counts.entry(count).or_insert(0);
            *freq_count += 1;
        }

        let mut counts: Vec<usize> = freq_counts.keys().map(|&&k| k).collect();
        counts.sort();

        for count in counts {
            write!(out, "{}\t{}\n", count, freq_counts.get(&count).unwrap_or(&0))?;
        }

        Ok(())
    }
}

impl IntoIterator for TagCounts {
    type Item = (String, usize);
    type IntoIter = ::std::collections::hash_map::IntoIter<String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> FromIterator<&'a str> for TagCounts {
    fn from_iter<I>(iter: I) -> TagCounts
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tag_counts = HashMap::new();

        for tag in iter {
            let tag_count = tag_counts.entry(tag.to_string()).or_insert(0);
            *tag_count += 1;
        }

        TagCounts(tag_counts)
    }
}

impl FromIterator<String> for TagCounts {
    fn from_iter<I>(iter: I) -> TagCounts
    where
        I: IntoIterator<Item = String>,
    {
        let mut tag_counts = HashMap::new();

        for tag in iter {
            let tag_count = tag_counts.entry(tag).or_insert(0);
            *tag_count += 1;
        }

        TagCounts(tag_counts)
    }
}

/// Largest maximum count rendered as one bar per discrete count value.
/// Wider tables fall back to a fixed-bin histogram over the raw counts.
pub const MAX_BAR_COUNT: usize = 1000;

/// Bin count for the wide-table fallback.
pub const WIDE_DIST_BINS: usize = 250;

/// Table of tag multiplicities: entry `c` holds the number of distinct
/// tags seen exactly `c` times, densely over `1..=max_count`.
pub struct CountDist(Vec<usize>);

impl CountDist {
    pub fn fits_bars(&self) -> bool {
        self.max_count() <= MAX_BAR_COUNT
    }

    /// Count-axis label spacing that keeps per-count bar charts readable.
    pub fn tick_spacing(&self) -> usize {
        let spacing = (self.max_count() as f64 / 250.0).round() as usize * 5;
        spacing.max(1)
    }

    pub fn tags_with(&self, count: usize) -> usize {
        if count >= 1 && count <= self.0.len() {
            self.0[count - 1]
        } else {
            0
        }
    }

    pub fn max_count(&self) -> usize {
        self.0.len()
    }

    pub fn max_tags(&self) -> usize {
        self.0.iter().cloned().max().unwrap_or(0)
    }

    pub fn entries(&self) -> Vec<(usize, usize)> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &ntags)| (i + 1, ntags))
            .collect()
    }

    pub fn total_records(&self) -> usize {
        self.entries().iter().map(|&(count, ntags)| count * ntags).sum()
    }

    pub fn total_tags(&self) -> usize {
        self.0.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn id_only() -> LineFormat {
        LineFormat::from_keywords(&["id"]).unwrap()
    }

    fn id_score() -> LineFormat {
        LineFormat::from_keywords(&["id", "likelihood"]).unwrap()
    }

    #[test]
    fn tally_counts_occurrences() {
        let input = "a\nb\nc\nc\n";
        let mut stats = ParseStats::default();
        let counts =
            TagCounts::tally(&id_only(), None, Cursor::new(input), &mut stats).unwrap();

        assert_eq!(counts.get("a"), 1);
        assert_eq!(counts.get("b"), 1);
        assert_eq!(counts.get("c"), 2);
        assert_eq!(counts.get("d"), 0);
        assert_eq!(counts.distinct(), 3);
        assert_eq!(counts.total(), 4);
        assert_eq!(stats.records, 4);
        assert_eq!(stats.skipped(), 0);
    }

    #[test]
    fn tally_skips_malformed() {
        let input = "a 0.5\n\nb two fields extra\nb bad\nb 0.7\n";
        let mut stats = ParseStats::default();
        let counts =
            TagCounts::tally(&id_score(), None, Cursor::new(input), &mut stats).unwrap();

        assert_eq!(counts.get("a"), 1);
        assert_eq!(counts.get("b"), 1);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.field_count_skips, 2);
        assert_eq!(stats.bad_score_skips, 1);
    }

    #[test]
    fn tally_requires_id() {
        let format = LineFormat::from_keywords(&["template", "likelihood"]).unwrap();
        let mut stats = ParseStats::default();
        assert!(TagCounts::tally(&format, None, Cursor::new("X 0.5\n"), &mut stats).is_err());
    }

    #[test]
    fn threshold_excludes_strictly_below() {
        let input = "a 0.5\na 0.49\nb 0.2\n";
        let mut stats = ParseStats::default();
        let counts =
            TagCounts::tally(&id_score(), Some(0.5), Cursor::new(input), &mut stats).unwrap();

        assert_eq!(counts.get("a"), 1);
        assert_eq!(counts.get("b"), 0);
        // Below-threshold lines are still well-formed records.
        assert_eq!(stats.records, 3);
    }

    #[test]
    fn threshold_never_raises_counts() {
        let input = "a 0.9\na 0.3\nb 0.5\nb 0.6\nc 0.1\n";
        let mut stats = ParseStats::default();
        let loose =
            TagCounts::tally(&id_score(), Some(0.2), Cursor::new(input), &mut stats).unwrap();
        let mut stats = ParseStats::default();
        let strict =
            TagCounts::tally(&id_score(), Some(0.55), Cursor::new(input), &mut stats).unwrap();

        for tag in ["a", "b", "c"].iter() {
            assert!(strict.get(tag) <= loose.get(tag));
        }
    }

    #[test]
    fn threshold_ignored_without_likelihood_field() {
        let input = "a\nb\n";
        let mut stats = ParseStats::default();
        let counts =
            TagCounts::tally(&id_only(), Some(0.9), Cursor::new(input), &mut stats).unwrap();
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn dist_from_counts() {
        let counts = TagCounts::from_iter(vec!["a", "b", "c", "c"]);
        let dist = counts.count_dist();

        assert_eq!(dist.tags_with(1), 2);
        assert_eq!(dist.tags_with(2), 1);
        assert_eq!(dist.tags_with(3), 0);
        assert_eq!(dist.max_count(), 2);
        assert_eq!(dist.entries(), vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn dist_zero_fills_gaps() {
        let counts = TagCounts::from_iter(vec!["a", "a", "a", "a", "b"]);
        let dist = counts.count_dist();

        assert_eq!(dist.entries(), vec![(1, 1), (2, 0), (3, 0), (4, 1)]);
        assert_eq!(dist.max_tags(), 1);
    }

    #[test]
    fn dist_conserves_totals() {
        let counts = TagCounts::from_iter(vec!["a", "b", "b", "c", "c", "c", "c", "d"]);
        let dist = counts.count_dist();

        assert_eq!(dist.total_records(), counts.total());
        assert_eq!(dist.total_tags(), counts.distinct());
    }

    #[test]
    fn dist_is_a_pure_view() {
        let counts = TagCounts::from_iter(vec!["a", "b", "c", "c"]);
        assert_eq!(counts.count_dist().entries(), counts.count_dist().entries());
        assert_eq!(counts.get("c"), 2);
    }

    #[test]
    fn empty_dist() {
        let counts = TagCounts::from_iter(Vec::<&str>::new());
        let dist = counts.count_dist();
        assert_eq!(dist.max_count(), 0);
        assert!(dist.entries().is_empty());
    }

    #[test]
    fn narrow_dist_renders_as_bars() {
        assert!(CountDist(vec![1; 1000]).fits_bars());
        assert!(!CountDist(vec![1; 1001]).fits_bars());
    }

    #[test]
    fn tick_spacing_tracks_max_count() {
        assert_eq!(CountDist(vec![1]).tick_spacing(), 1);
        assert_eq!(CountDist(vec![1; 100]).tick_spacing(), 1);
        assert_eq!(CountDist(vec![1; 250]).tick_spacing(), 5);
        assert_eq!(CountDist(vec![1; 1000]).tick_spacing(), 20);
    }

    #[test]
    fn table_is_tag_sorted() {
        let counts = TagCounts::from_iter(vec!["c", "a", "c", "b"]);
        let mut out = Vec::new();
        counts.write_table(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\t1\nb\t1\nc\t2\n");
    }

    #[test]
    fn freq_table_is_count_sorted() {
        let counts = TagCounts::from_iter(vec!["a", "b", "c", "c"]);
        let mut out = Vec::new();
        counts.write_freq_table(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\t2\n2\t1\n");
    }

    #[test]
    fn count_map_returns_the_table() {
        let counts = TagCounts::from_iter(vec!["a", "b", "c", "c"]);
        let map = counts.count_map();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("c"), Some(&2));
        assert_eq!(map.get("d"), None);
    }

    #[test]
    fn into_iter_yields_every_pair() {
        let counts = TagCounts::from_iter(vec!["a", "b", "b"]);
        let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
        pairs.sort();

        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }
}
