use std::path::Path;

use anyhow;
use plotters::prelude::*;

use counts::CountDist;
use hist::{ScoreHist, SCORE_BINS};

const CHART_SIZE: (u32, u32) = (640, 480);

/// One bar per discrete count value, labelled on the spacing the
/// distribution asks for. Empty distributions produce no file.
pub fn count_dist_bars(path: &Path, dist: &CountDist) -> Result<(), anyhow::Error> {
    if dist.max_count() == 0 {
        return Ok(());
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let xmax = dist.max_count() as i32 + 1;
    let ymax = dist.max_tags() as i32 + 1;
    let mut chart = ChartBuilder::on(&root)
        .caption("PrimerID count distribution", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..xmax, 0..ymax)?;

    chart
        .configure_mesh()
        .x_labels(dist.max_count() / dist.tick_spacing() + 2)
        .x_desc("Count")
        .y_desc("PrimerIDs")
        .draw()?;

    chart.draw_series(dist.entries().iter().map(|&(count, ntags)| {
        Rectangle::new(
            [(count as i32, 0), (count as i32 + 1, ntags as i32)],
            BLUE.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Renders one binned table as a bar-style histogram.
pub fn score_hist(
    path: &Path,
    hist: &ScoreHist,
    caption: &str,
    x_desc: &str,
) -> Result<(), anyhow::Error> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let ymax = hist.max_count() as f64 * 1.05;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(hist.lo()..hist.hi(), 0f64..ymax)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(hist.bins().iter().map(|bin| {
        Rectangle::new([(bin.lo, 0.0), (bin.hi, bin.count as f64)], BLUE.filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Overlay of runner-up score distributions for one winning template,
/// one frequency curve through bin centers per runner-up. Runner-ups
/// with no scores contribute no curve; no curves, no file.
pub fn relative_curves(
    path: &Path,
    winner: &str,
    others: &[(&str, &[f64])],
) -> Result<(), anyhow::Error> {
    let mut curves = Vec::new();
    for &(name, scores) in others.iter() {
        if let Some(hist) = ScoreHist::new(scores, SCORE_BINS) {
            curves.push((name, hist));
        }
    }
    if curves.is_empty() {
        return Ok(());
    }

    let mut lo = std::f64::INFINITY;
    let mut hi = std::f64::NEG_INFINITY;
    let mut top = 0;
    for &(_, ref hist) in curves.iter() {
        lo = lo.min(hist.lo());
        hi = hi.max(hist.hi());
        top = std::cmp::max(top, hist.max_count());
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(winner, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(lo..hi, 0f64..(top as f64 * 1.05))?;

    chart
        .configure_mesh()
        .x_desc("Likelihood")
        .y_desc("Frequency")
        .draw()?;

    for (idx, &(name, ref hist)) in curves.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                hist.bins()
                    .iter()
                    .map(|bin| ((bin.lo + bin.hi) / 2.0, bin.count as f64)),
                color.stroke_width(2),
            ))?
            .label(name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use counts::TagCounts;
    use std::iter::FromIterator;
    use tempfile;

    #[test]
    fn empty_dist_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        let dist = TagCounts::from_iter(Vec::<&str>::new()).count_dist();
        count_dist_bars(&path, &dist).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn bars_write_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.svg");
        let dist = TagCounts::from_iter(vec!["a", "b", "c", "c"]).count_dist();
        count_dist_bars(&path, &dist).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn score_hist_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.svg");
        let hist = ScoreHist::new(&[0.1, 0.5, 0.9], SCORE_BINS).unwrap();
        score_hist(&path, &hist, "All", "Likelihood").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn overlay_writes_svg_with_legend_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rel.svg");
        let y: &[f64] = &[0.3, 0.4, 0.35];
        let z: &[f64] = &[0.1, 0.2];
        relative_curves(&path, "X", &[("Y", y), ("Z", z)]).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Y"));
        assert!(svg.contains("Z"));
    }

    #[test]
    fn overlay_without_scores_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rel.svg");
        relative_curves(&path, "X", &[]).unwrap();
        assert!(!path.exists());
    }
}
