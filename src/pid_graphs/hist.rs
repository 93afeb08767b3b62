/// Bin count for likelihood score histograms.
pub const SCORE_BINS: usize = 50;

/// One half-open histogram bin; the top bin also includes its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Equal-width histogram over a batch of scores.
///
/// Bins span `[min, max]` of the input with the top edge closed, so the
/// maximum value lands in the last bin rather than falling off the end.
/// When every value is identical the span is widened by 0.5 on each side
/// to keep the bin width positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreHist {
    bins: Vec<Bin>,
}

impl ScoreHist {
    /// Bins `values`, or `None` when there is nothing to bin.
    pub fn new(values: &[f64], nbins: usize) -> Option<ScoreHist> {
        if values.is_empty() || nbins == 0 {
            return None;
        }

        let mut min = values[0];
        let mut max = values[0];
        for &v in values.iter() {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let span = hi - lo;

        let mut counts = vec![0; nbins];
        for &v in values.iter() {
            let mut idx = (((v - lo) / span) * nbins as f64).floor() as usize;
            if idx >= nbins {
                idx = nbins - 1;
            }
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lo: lo + span * (i as f64 / nbins as f64),
                hi: lo + span * ((i + 1) as f64 / nbins as f64),
                count: count,
            })
            .collect();
        Some(ScoreHist { bins: bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn lo(&self) -> f64 {
        self.bins[0].lo
    }

    pub fn hi(&self) -> f64 {
        self.bins[self.bins.len() - 1].hi
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
