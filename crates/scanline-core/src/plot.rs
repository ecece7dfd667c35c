//! Plot rendering (behind the `plots` feature)
//!
//! All plots are best-effort: a failed render logs a warning and the run
//! continues. Without the feature the entry point is a logging no-op.

use std::path::Path;

use scanline_io::geo::PlaneOutline;
use scanline_io::survey::FieldMeasurement;

use crate::row::ComparisonRow;

/// File name of the dip-error distribution plot
pub const DIP_ERROR_PLOT: &str = "erros_dip.png";
/// File name of the dip-direction-error distribution plot
pub const DIP_DIR_ERROR_PLOT: &str = "erros_dipdir.png";
/// File name of the orientation-diagram grid
pub const ORIENTATION_PLOT: &str = "orientacoes.png";
/// File name of the plane-outline map
pub const MAP_PLOT: &str = "mapa_planos.png";

/// Render every plot into `out_dir`, logging and continuing on failure
#[cfg(feature = "plots")]
pub fn render_plots(
    field: &[FieldMeasurement],
    rows: &[ComparisonRow],
    outlines: Option<&[PlaneOutline]>,
    out_dir: &Path,
) {
    use tracing::{info, warn};

    let attempts = [
        (
            DIP_ERROR_PLOT,
            error_distribution(
                rows,
                |r| r.dip_error,
                "Dip error by plane and method",
                "Erro_Dip (degrees)",
                &out_dir.join(DIP_ERROR_PLOT),
            ),
        ),
        (
            DIP_DIR_ERROR_PLOT,
            error_distribution(
                rows,
                |r| r.dip_dir_error,
                "Dip-direction error by plane and method",
                "Erro_DipDir (degrees)",
                &out_dir.join(DIP_DIR_ERROR_PLOT),
            ),
        ),
        (
            ORIENTATION_PLOT,
            orientation_diagrams(field, rows, &out_dir.join(ORIENTATION_PLOT)),
        ),
    ];
    for (name, result) in attempts {
        match result {
            Ok(()) => info!("Saved {name}"),
            Err(e) => warn!("Failed to render {name}: {e}"),
        }
    }

    if let Some(outlines) = outlines {
        match outline_map(outlines, &out_dir.join(MAP_PLOT)) {
            Ok(()) => info!("Saved {MAP_PLOT}"),
            Err(e) => warn!("Failed to render {MAP_PLOT}: {e}"),
        }
    }
}

/// Stub used when the crate is built without the `plots` feature
#[cfg(not(feature = "plots"))]
pub fn render_plots(
    _field: &[FieldMeasurement],
    _rows: &[ComparisonRow],
    _outlines: Option<&[PlaneOutline]>,
    _out_dir: &Path,
) {
    tracing::info!("Plot rendering not compiled in, skipping");
}

#[cfg(feature = "plots")]
use plotters::style::RGBColor;

#[cfg(feature = "plots")]
const SERIES_COLORS: [RGBColor; 4] = [
    plotters::style::colors::BLUE,
    plotters::style::colors::RED,
    plotters::style::colors::GREEN,
    plotters::style::colors::MAGENTA,
];

/// Lower-hemisphere equal-area projection of a plane's pole.
///
/// The pole of a plane with dip `d` and dip direction `dd` plunges at
/// 90 - d towards dd + 180; the Schmidt radius sqrt(2)*sin(d/2) is
/// normalized so a vertical plane lands on the unit circle.
#[cfg(feature = "plots")]
fn pole_xy(dip_dir: f64, dip: f64) -> (f64, f64) {
    let trend = (dip_dir + 180.0).to_radians();
    let r = std::f64::consts::SQRT_2 * (dip.to_radians() / 2.0).sin();
    (r * trend.sin(), r * trend.cos())
}

#[cfg(feature = "plots")]
fn distinct_methods(rows: &[ComparisonRow]) -> Vec<String> {
    let mut methods: Vec<String> = Vec::new();
    for row in rows {
        if !methods.contains(&row.method) {
            methods.push(row.method.clone());
        }
    }
    methods
}

#[cfg(feature = "plots")]
fn error_distribution(
    rows: &[ComparisonRow],
    value: fn(&ComparisonRow) -> f64,
    title: &str,
    y_desc: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    use plotters::prelude::*;

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = rows.iter().map(value).fold(0.0f64, f64::max) * 1.1 + 1.0;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(45)
        .y_label_area_size(45)
        .build_cartesian_2d(0.5f64..4.5f64, 0.0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Plane")
        .y_desc(y_desc)
        .draw()?;

    let methods = distinct_methods(rows);
    for (idx, method) in methods.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        // Spread method series around the integer plane position.
        let offset = (idx as f64 - (methods.len() as f64 - 1.0) / 2.0) * 0.12;
        chart
            .draw_series(
                rows.iter()
                    .filter(|r| &r.method == method)
                    .map(|r| Circle::new((r.plane as f64 + offset, value(r)), 4, color.filled())),
            )?
            .label(method)
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

#[cfg(feature = "plots")]
fn orientation_diagrams(
    field: &[FieldMeasurement],
    rows: &[ComparisonRow],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    use plotters::prelude::*;
    use scanline_io::plane_code::PLANE_IDS;

    let root = BitMapBackend::new(path, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 2));

    let methods = distinct_methods(rows);
    for (area, plane) in areas.iter().zip(PLANE_IDS) {
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .caption(format!("Plane {plane}"), ("sans-serif", 18))
            .build_cartesian_2d(-1.1f64..1.1f64, -1.1f64..1.1f64)?;

        // Primitive circle: the projection boundary.
        chart.draw_series(std::iter::once(PathElement::new(
            (0..=360)
                .map(|deg| {
                    let t = (deg as f64).to_radians();
                    (t.cos(), t.sin())
                })
                .collect::<Vec<_>>(),
            BLACK,
        )))?;

        // Field poles for this plane.
        chart.draw_series(
            field
                .iter()
                .filter(|m| m.plane == plane)
                .map(|m| Circle::new(pole_xy(m.dip_dir, m.dip), 3, RED.filled())),
        )?;

        // Method mean orientations from the comparison table.
        for (idx, method) in methods.iter().enumerate() {
            let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
            chart.draw_series(
                rows.iter()
                    .filter(|r| r.plane == plane && &r.method == method)
                    .map(|r| {
                        TriangleMarker::new(
                            pole_xy(r.dip_dir_method, r.dip_method),
                            5,
                            color.filled(),
                        )
                    }),
            )?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(feature = "plots")]
fn outline_map(
    outlines: &[PlaneOutline],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    use plotters::prelude::*;

    let points = outlines.iter().flat_map(|o| o.ring.iter());
    let (mut min_x, mut min_y, mut max_x, mut max_y) =
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    if !(min_x.is_finite() && min_y.is_finite()) {
        return Err("no outline coordinates to plot".into());
    }
    let pad_x = (max_x - min_x).max(1e-6) * 0.05;
    let pad_y = (max_y - min_y).max(1e-6) * 0.05;

    let root = BitMapBackend::new(path, (900, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Mapped planes", ("sans-serif", 22))
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(min_x - pad_x..max_x + pad_x, min_y - pad_y..max_y + pad_y)?;
    chart.configure_mesh().draw()?;

    for outline in outlines {
        let color = if outline.plane >= 1 {
            SERIES_COLORS[(outline.plane as usize - 1) % SERIES_COLORS.len()]
        } else {
            plotters::style::colors::BLACK
        };
        let mut ring = outline.ring.clone();
        if ring.first() != ring.last() {
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
        }
        chart.draw_series(std::iter::once(PathElement::new(ring, color)))?;
    }

    root.present()?;
    Ok(())
}
