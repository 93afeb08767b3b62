#[macro_use]
extern crate anyhow;
extern crate itertools;
extern crate plotters;

#[cfg(test)]
extern crate tempfile;

pub mod comparative;
pub mod counts;
pub mod hist;
pub mod likelihoods;
pub mod line_format;
pub mod plot;
pub mod relative;
pub mod scores;
pub mod tag_dist;
