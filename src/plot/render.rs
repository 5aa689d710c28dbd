// Drawing the fused chart with plotters.
//
// One cartesian chart holds all three layers: cluster bands in the
// background, dendrogram segments, then the coverage bars. Value runs on the
// x axis, topic slots on the y axis, so the whole figure reads horizontally.
// The y range is exactly `-0.5..n-0.5`, which makes the mesh place its n
// ticks on the integer slots the labels live at.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::output::truncate_chars;
use crate::publication::Publication;

use super::layout::PlotModel;

/// Output raster size: a 7×5 inch figure at 100 DPI.
pub const IMAGE_WIDTH: u32 = 700;
pub const IMAGE_HEIGHT: u32 = 500;

/// Bar thickness in slot units; three bars plus gaps fit in one slot.
const BAR_THICKNESS: f64 = 0.24;

fn publication_color(publication: Publication) -> RGBColor {
    match publication {
        Publication::EgyptIndependent => RGBColor(31, 119, 180),
        Publication::Ahram => RGBColor(214, 39, 40),
        Publication::DailyNewsEgypt => RGBColor(44, 160, 44),
    }
}

fn bar_offset(publication: Publication) -> f64 {
    match publication {
        Publication::EgyptIndependent => -0.27,
        Publication::Ahram => 0.0,
        Publication::DailyNewsEgypt => 0.27,
    }
}

/// Render the plot model to a PNG at `path`.
pub fn render(model: &PlotModel, path: &Path) -> Result<()> {
    let n = model.leaf_labels.len();
    let x_max = model.max_height * 1.06;

    let root = BitMapBackend::new(path, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Topic clusters and publication coverage",
            ("sans-serif", 18),
        )
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(120)
        .build_cartesian_2d(0.0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

    let labels = &model.leaf_labels;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Ward merge distance")
        .x_labels(6)
        .y_labels(n)
        .y_label_formatter(&|y: &f64| {
            let slot = y.round();
            if (y - slot).abs() > 1e-6 || slot < 0.0 || slot as usize >= labels.len() {
                return String::new();
            }
            truncate_chars(&labels[slot as usize], 18)
        })
        .draw()?;

    // Alternating background bands, one per cluster
    for (i, band) in model.bands.iter().enumerate() {
        if i % 2 == 1 {
            continue;
        }
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (0.0, band.first as f64 - 0.5),
                (x_max, band.last as f64 + 0.5),
            ],
            BLACK.mix(0.06).filled(),
        )))?;
    }

    chart.draw_series(model.segments.iter().map(|seg| {
        PathElement::new(
            vec![(seg.height0, seg.rank0), (seg.height1, seg.rank1)],
            BLACK.mix(0.8),
        )
    }))?;

    for publication in Publication::ALL {
        let color = publication_color(publication);
        let offset = bar_offset(publication);
        let bars: Vec<Rectangle<(f64, f64)>> = model
            .rows
            .iter()
            .filter(|row| row.publication == publication)
            .map(|row| {
                let center = row.rank as f64 + offset;
                Rectangle::new(
                    [
                        (0.0, center - BAR_THICKNESS / 2.0),
                        (row.scaled, center + BAR_THICKNESS / 2.0),
                    ],
                    color.mix(0.85).filled(),
                )
            })
            .collect();
        if bars.is_empty() {
            continue;
        }
        chart
            .draw_series(bars)?
            .label(publication.display_name())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
