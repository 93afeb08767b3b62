#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate clap;
extern crate pid_graphs;

use std::io::Write;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use pid_graphs::comparative;
use pid_graphs::likelihoods;
use pid_graphs::tag_dist;

fn main() {
    let matches = App::new("pid-graphs")
        .version("1.0")
        .about("Charts for PrimerID tag counts and likelihood scores")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("tag_dist")
                .about("Distribution of per-tag occurrence counts")
                .arg(
                    Arg::with_name("input")
                        .value_name("INPUT-TXT")
                        .help("Whitespace-delimited record file, \"-\" for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .value_name("FIELD")
                        .help("Field meaning, one of id/template/likelihood, once per field in line order")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("threshold")
                        .short("t")
                        .long("threshold")
                        .value_name("MIN-SCORE")
                        .help("Skip records whose likelihood falls below this score")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("outbase")
                        .short("o")
                        .long("outbase")
                        .value_name("OUTBASE")
                        .help("Base name for constructing output names")
                        .takes_value(true)
                        .default_value("pid"),
                )
                .arg(
                    Arg::with_name("counts")
                        .long("counts")
                        .value_name("COUNTS-TXT")
                        .help("Tab-delimited text file of tag counts, \"-\" for stdout")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("freqs")
                        .long("freqs")
                        .value_name("FREQS-TXT")
                        .help("Tab-delimited text file of count frequencies")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("likelihoods")
                .about("Histogram likelihood scores per template")
                .arg(
                    Arg::with_name("input")
                        .value_name("INPUT-TXT")
                        .help("Whitespace-delimited record file, \"-\" for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .value_name("FIELD")
                        .help("Field meaning, one of id/template/likelihood, once per field in line order")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("outbase")
                        .short("o")
                        .long("outbase")
                        .value_name("OUTBASE")
                        .help("Base name for constructing output names")
                        .takes_value(true)
                        .default_value("pid"),
                ),
        )
        .subcommand(
            SubCommand::with_name("comparative")
                .about("Runner-up score distributions per winning template")
                .arg(
                    Arg::with_name("input")
                        .value_name("INPUT-TXT")
                        .help("Whitespace-delimited record file, \"-\" for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .value_name("FIELD")
                        .help("Field meaning, one of id/template/likelihood, once per field in line order")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("outbase")
                        .short("o")
                        .long("outbase")
                        .value_name("OUTBASE")
                        .help("Base name for constructing output names")
                        .takes_value(true)
                        .default_value("pid"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("tag_dist", Some(sub)) => tag_dist::tag_dist(tag_dist_config(sub)),
        ("likelihoods", Some(sub)) => likelihoods::likelihoods(likelihoods_config(sub)),
        ("comparative", Some(sub)) => comparative::comparative(comparative_config(sub)),
        (cmd, _) => Err(anyhow!("unrecognized command `{}`", cmd)),
    };

    match result {
        Ok(_) => (),
        Err(err) => {
            std::io::stderr()
                .write(format!("error: {}\n", err).as_bytes())
                .unwrap();
            std::process::exit(1);
        }
    }
}

fn tag_dist_config(matches: &ArgMatches) -> tag_dist::Config {
    tag_dist::Config {
        input: matches.value_of("input").unwrap().to_string(),
        format: matches
            .values_of("format")
            .unwrap()
            .map(String::from)
            .collect(),
        min_likelihood: if matches.is_present("threshold") {
            Some(value_t!(matches.value_of("threshold"), f64).unwrap_or_else(|e| e.exit()))
        } else {
            None
        },
        outbase: matches.value_of("outbase").unwrap().to_string(),
        counts_out: matches.value_of("counts").map(String::from),
        freqs_out: matches.value_of("freqs").map(String::from),
    }
}

fn likelihoods_config(matches: &ArgMatches) -> likelihoods::Config {
    likelihoods::Config {
        input: matches.value_of("input").unwrap().to_string(),
        format: matches
            .values_of("format")
            .unwrap()
            .map(String::from)
            .collect(),
        outbase: matches.value_of("outbase").unwrap().to_string(),
    }
}

fn comparative_config(matches: &ArgMatches) -> comparative::Config {
    comparative::Config {
        input: matches.value_of("input").unwrap().to_string(),
        format: matches
            .values_of("format")
            .unwrap()
            .map(String::from)
            .collect(),
        outbase: matches.value_of("outbase").unwrap().to_string(),
    }
}
