use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow;

use counts::{TagCounts, WIDE_DIST_BINS};
use hist::ScoreHist;
use line_format::{LineFormat, ParseStats};
use plot;

#[derive(Debug)]
pub struct Config {
    pub input: String,
    pub format: Vec<String>,
    pub min_likelihood: Option<f64>,
    pub outbase: String,
    pub counts_out: Option<String>,
    pub freqs_out: Option<String>,
}

pub fn tag_dist(config: Config) -> Result<(), anyhow::Error> {
    let format = LineFormat::from_keywords(&config.format)?;

    let reader: Box<Read> = if config.input == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(&config.input)?)
    };

    let mut stats = ParseStats::default();
    let tag_counts = TagCounts::tally(
        &format,
        config.min_likelihood,
        BufReader::new(reader),
        &mut stats,
    )?;

    if let Some(counts_filename) = config.counts_out {
        let writer: Box<Write> = if counts_filename == "-" {
            Box::new(io::stdout())
        } else {
            Box::new(File::create(&counts_filename)?)
        };
        tag_counts.write_table(writer)?;
    }

    if let Some(freqs_filename) = config.freqs_out {
        tag_counts.write_freq_table(File::create(&freqs_filename)?)?;
    }

    let chart_out = output_filename(&config.outbase, "-count-dist.svg");
    let dist = tag_counts.count_dist();
    if dist.fits_bars() {
        plot::count_dist_bars(&chart_out, &dist)?;
    } else {
        let raw: Vec<f64> = tag_counts.into_iter().map(|(_, count)| count as f64).collect();
        if let Some(hist) = ScoreHist::new(&raw, WIDE_DIST_BINS) {
            plot::score_hist(&chart_out, &hist, "PrimerID count distribution", "Count")?;
        }
    }

    Ok(())
}

fn output_filename(output_base: &str, name: &str) -> PathBuf {
    let base_ref: &Path = output_base.as_ref();
    let mut namebase = base_ref
        .file_name()
        .map_or(std::ffi::OsString::new(), std::ffi::OsStr::to_os_string);
    namebase.push(name);
    base_ref.with_file_name(namebase)
}
