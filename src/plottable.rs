#![warn(missing_docs)]
//! Rendering of a static diagram of an analyzed optical system.
//!
//! The diagram shows the optical axis, the lenses (red for converging, blue for diverging ones), the
//! front and back focal points as well as the front and back principal planes. The effective focal
//! length is shown as caption. Drawing always happens on a [`DrawingArea`] handed in by the caller;
//! there is no global drawing surface.
use crate::{
    error::{ParaxisError, ParaxisResult},
    reporter::AnalysisReport,
};
use approx::abs_diff_eq;
use plotters::{
    backend::DrawingBackend,
    chart::{ChartBuilder, SeriesLabelPosition},
    coord::Shift,
    element::{Circle, PathElement, Text},
    prelude::{DrawingArea, IntoDrawingArea, SVGBackend},
    series::{DashedLineSeries, LineSeries},
    style::{Color, IntoFont, BLACK, BLUE, CYAN, RED, WHITE, YELLOW},
};
use uom::si::length::millimeter;

/// Trait for elements which can draw themselves onto a [`DrawingArea`].
pub trait Plottable {
    /// Draws this element onto the given drawing area.
    ///
    /// # Errors
    ///
    /// This function returns an error if the drawing backend fails.
    fn to_plot<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> ParaxisResult<()>;
}

fn plot_error<E: std::fmt::Display>(e: E) -> ParaxisError {
    ParaxisError::Plot(e.to_string())
}

/// A lens as drawn in the diagram (all values in mm).
#[derive(Debug, Clone, PartialEq)]
pub struct LensMarker {
    /// axial position
    pub position: f64,
    /// focal length
    pub focal_length: f64,
    /// `true` for a positive focal length
    pub converging: bool,
}
impl LensMarker {
    /// Returns the text label shown next to the lens.
    #[must_use]
    pub fn label(&self) -> String {
        format!("f: {:.1}", self.focal_length)
    }
}

/// Geometry of a system diagram in millimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    lenses: Vec<LensMarker>,
    effective_focal_length: f64,
    front_focal_point: f64,
    back_focal_point: f64,
    front_principal_plane: f64,
    back_principal_plane: f64,
}
impl DiagramLayout {
    /// Extracts the diagram geometry from an [`AnalysisReport`].
    #[must_use]
    pub fn from_report(report: &AnalysisReport) -> Self {
        let lenses = report
            .lenses()
            .iter()
            .map(|lens| LensMarker {
                position: lens.position().get::<millimeter>(),
                focal_length: lens.focal_length().get::<millimeter>(),
                converging: lens.is_converging(),
            })
            .collect();
        Self {
            lenses,
            effective_focal_length: report.effective_focal_length().get::<millimeter>(),
            front_focal_point: report.front().focal_point.get::<millimeter>(),
            back_focal_point: report.back().focal_point.get::<millimeter>(),
            front_principal_plane: report.front().principal_plane.get::<millimeter>(),
            back_principal_plane: report.back().principal_plane.get::<millimeter>(),
        }
    }
    /// Returns the lens markers.
    #[must_use]
    pub fn lenses(&self) -> &[LensMarker] {
        &self.lenses
    }
    /// Returns the diagram caption.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Effective focal length: {:.3} mm", self.effective_focal_length)
    }
    /// Returns the range of the position axis.
    ///
    /// The range covers all lenses, focal points and principal planes plus a margin of 10 % on
    /// each side. Non-finite values are ignored. A range of zero width is widened by 1 mm on
    /// each side.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        let positions = self
            .lenses
            .iter()
            .map(|l| l.position)
            .chain([
                self.front_focal_point,
                self.back_focal_point,
                self.front_principal_plane,
                self.back_principal_plane,
            ])
            .filter(|x| x.is_finite());
        let (min, max) = positions.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), x| {
            (min.min(x), max.max(x))
        });
        if min > max {
            return (-1.0, 1.0);
        }
        let span = max - min;
        let margin = if abs_diff_eq!(span, 0.0) {
            1.0
        } else {
            0.1 * span
        };
        (min - margin, max + margin)
    }
}

impl Plottable for AnalysisReport {
    fn to_plot<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> ParaxisResult<()> {
        let layout = DiagramLayout::from_report(self);
        let (x_min, x_max) = layout.x_range();
        let mut chart = ChartBuilder::on(root)
            .caption(layout.title(), ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .build_cartesian_2d(x_min..x_max, -1.0..1.0)
            .map_err(plot_error)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .disable_y_axis()
            .x_desc("Position [mm]")
            .draw()
            .map_err(plot_error)?;

        chart
            .draw_series(LineSeries::new(vec![(x_min, 0.0), (x_max, 0.0)], &BLACK))
            .map_err(plot_error)?;
        for lens in layout.lenses() {
            let color = if lens.converging { RED } else { BLUE };
            chart
                .draw_series(LineSeries::new(
                    vec![(lens.position, -0.8), (lens.position, 0.8)],
                    color.stroke_width(2),
                ))
                .map_err(plot_error)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    lens.label(),
                    (lens.position, 0.9),
                    ("sans-serif", 14).into_font(),
                )))
                .map_err(plot_error)?;
        }

        chart
            .draw_series(std::iter::once(Circle::new(
                (layout.back_focal_point, 0.0),
                5,
                YELLOW.filled(),
            )))
            .map_err(plot_error)?
            .label("back focal point")
            .legend(|(x, y)| Circle::new((x, y), 5, YELLOW.filled()));
        chart
            .draw_series(std::iter::once(Circle::new(
                (layout.front_focal_point, 0.0),
                5,
                CYAN.filled(),
            )))
            .map_err(plot_error)?
            .label("front focal point")
            .legend(|(x, y)| Circle::new((x, y), 5, CYAN.filled()));
        chart
            .draw_series(DashedLineSeries::new(
                vec![
                    (layout.back_principal_plane, -1.0),
                    (layout.back_principal_plane, 1.0),
                ],
                10,
                5,
                YELLOW.stroke_width(2),
            ))
            .map_err(plot_error)?
            .label("back PP")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], YELLOW));
        chart
            .draw_series(DashedLineSeries::new(
                vec![
                    (layout.front_principal_plane, -1.0),
                    (layout.front_principal_plane, 1.0),
                ],
                10,
                5,
                CYAN.stroke_width(2),
            ))
            .map_err(plot_error)?
            .label("front PP")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CYAN));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;
        Ok(())
    }
}

/// Renders the diagram of an [`AnalysisReport`] into an SVG document held in memory.
///
/// # Errors
///
/// This function returns [`ParaxisError::Plot`] if the drawing fails (e.g. no font is available).
pub fn render_svg(report: &AnalysisReport, size: (u32, u32)) -> ParaxisResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;
        report.to_plot(&root)?;
        root.present().map_err(plot_error)?;
    }
    Ok(svg)
}
