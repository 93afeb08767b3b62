use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow;

use line_format::{LineFormat, ParseStats};
use plot;
use relative::RelativeScores;

#[derive(Debug)]
pub struct Config {
    pub input: String,
    pub format: Vec<String>,
    pub outbase: String,
}

pub fn comparative(config: Config) -> Result<(), anyhow::Error> {
    let format = LineFormat::from_keywords(&config.format)?;

    let reader: Box<Read> = if config.input == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(&config.input)?)
    };

    let mut stats = ParseStats::default();
    let relative = RelativeScores::collect(&format, BufReader::new(reader), &mut stats)?;

    for winner in relative.winners() {
        let others = relative.others(winner);
        let chart_out = output_filename(&config.outbase, &format!("-rel-{}.svg", winner));
        plot::relative_curves(&chart_out, winner, &others)?;
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
