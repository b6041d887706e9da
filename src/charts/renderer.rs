//! Static Chart Renderer
//! Exports the current scatter view to SVG or PNG with plotters.
//!
//! Layout mirrors the interactive canvas:
//! 1. Plot area inset by the configured margins, axes on the bottom and left
//! 2. One translucent red circle per state with its abbreviation on top
//! 3. Three x-axis labels stacked under the plot, three rotated y-axis labels
//!    left of it; the active label of each axis is bold, the others grey

use crate::config::ChartConfig;
use crate::data::{Axis, Dataset};
use crate::scale::AxisDomain;
use crate::selection::{LabelMark, Selection};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const POINT_RGB: RGBColor = RGBColor(255, 0, 0);
const INACTIVE_RGB: RGBColor = RGBColor(170, 170, 170);
/// Vertical distance between stacked x-axis labels.
const X_LABEL_STEP: i32 = 15;
/// Horizontal distance between stacked y-axis labels.
const Y_LABEL_STEP: i32 = 15;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Unsupported export format: {0:?} (use .svg or .png)")]
    UnsupportedFormat(String),
}

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            _ => Err(RenderError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

/// Everything needed to draw one static chart.
pub struct ExportView<'a> {
    pub dataset: &'a Dataset,
    pub selection: Selection,
    pub domain: AxisDomain,
    pub config: &'a ChartConfig,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Write the view to `path`, choosing SVG or PNG by extension.
    pub fn export(view: &ExportView<'_>, path: &Path) -> Result<ExportFormat, RenderError> {
        let format = ExportFormat::from_path(path)?;
        match format {
            ExportFormat::Svg => Self::render_svg(view, path)?,
            ExportFormat::Png => Self::render_png(view, path)?,
        }
        log::info!("exported {} chart to {}", format.extension(), path.display());
        Ok(format)
    }

    pub fn render_svg(view: &ExportView<'_>, path: &Path) -> Result<(), RenderError> {
        let root = SVGBackend::new(path, (view.config.width, view.config.height)).into_drawing_area();
        Self::draw(&root, view)?;
        root.present().map_err(drawing_error)
    }

    /// Render to an in-memory SVG document.
    pub fn render_svg_string(view: &ExportView<'_>) -> Result<String, RenderError> {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (view.config.width, view.config.height))
                .into_drawing_area();
            Self::draw(&root, view)?;
            root.present().map_err(drawing_error)?;
        }
        Ok(buf)
    }

    pub fn render_png(view: &ExportView<'_>, path: &Path) -> Result<(), RenderError> {
        let root =
            BitMapBackend::new(path, (view.config.width, view.config.height)).into_drawing_area();
        Self::draw(&root, view)?;
        root.present().map_err(drawing_error)
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &ExportView<'_>,
    ) -> Result<(), RenderError> {
        let config = view.config;
        let margin = config.margin;
        let domain = view.domain;
        let (x_field, y_field) = (view.selection.x(), view.selection.y());

        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(root)
            .margin_top(margin.top)
            .margin_right(margin.right)
            .x_label_area_size(margin.bottom)
            .y_label_area_size(margin.left)
            .build_cartesian_2d(domain.x.min..domain.x.max, domain.y.min..domain.y.max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .label_style((FONT, 10))
            .draw()
            .map_err(drawing_error)?;

        let radius = config.point_radius.round().max(1.0) as u32;
        let point_style = POINT_RGB.mix(0.5).filled();
        chart
            .draw_series(view.dataset.records().iter().map(|r| {
                Circle::new(
                    (r.value(x_field) as f64, r.value(y_field) as f64),
                    radius,
                    point_style,
                )
            }))
            .map_err(drawing_error)?;

        let abbr_style = TextStyle::from((FONT, 10).into_font().style(FontStyle::Bold))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series(view.dataset.records().iter().map(|r| {
                Text::new(
                    r.abbr().to_string(),
                    (r.value(x_field) as f64, r.value(y_field) as f64),
                    abbr_style.clone(),
                )
            }))
            .map_err(drawing_error)?;

        Self::draw_axis_labels(root, view.selection, config)
    }

    fn draw_axis_labels<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        selection: Selection,
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        for (i, (field, mark)) in selection.label_marks(Axis::X).into_iter().enumerate() {
            let style = Self::label_style(mark, FontTransform::None);
            root.draw(&Text::new(
                field.display_name(),
                Self::x_label_position(config, i),
                style,
            ))
            .map_err(drawing_error)?;
        }

        for (i, (field, mark)) in selection.label_marks(Axis::Y).into_iter().enumerate() {
            let style = Self::label_style(mark, FontTransform::Rotate270);
            root.draw(&Text::new(
                field.display_name(),
                Self::y_label_position(config, i),
                style,
            ))
            .map_err(drawing_error)?;
        }

        Ok(())
    }

    fn label_style(mark: LabelMark, transform: FontTransform) -> TextStyle<'static> {
        let font = match mark {
            LabelMark::Active => (FONT, 10).into_font().style(FontStyle::Bold),
            LabelMark::Inactive => (FONT, 10).into_font(),
        };
        let style = TextStyle::from(font.transform(transform));
        match mark {
            LabelMark::Active => style.color(&BLACK),
            LabelMark::Inactive => style.color(&INACTIVE_RGB),
        }
    }

    /// Canvas position of the `index`-th x-axis label: under the plot,
    /// 40% across, stacked downwards.
    pub fn x_label_position(config: &ChartConfig, index: usize) -> (i32, i32) {
        let m = config.margin;
        let x = m.left as f64 + config.plot_width() as f64 / 2.5;
        let below_plot = m.top.saturating_add(config.plot_height()).saturating_add(m.top);
        let y = i32::try_from(below_plot)
            .unwrap_or(i32::MAX)
            .saturating_add(10 + X_LABEL_STEP * index as i32);
        (x.round() as i32, y)
    }

    /// Canvas position of the `index`-th y-axis label: left of the plot,
    /// a third of the way down, stacked towards the canvas edge.
    pub fn y_label_position(config: &ChartConfig, index: usize) -> (i32, i32) {
        let m = config.margin;
        let x = 45 - Y_LABEL_STEP * index as i32;
        let y = m.top as f64 + config.plot_height() as f64 / 1.5;
        (x, y.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Field, Record};
    use crate::scale::compute_domain;

    /// The `<text>` element whose content is exactly `content`.
    fn text_element<'a>(svg: &'a str, content: &str) -> &'a str {
        let end = svg
            .find(&format!(">{content}</text>"))
            .unwrap_or_else(|| panic!("no text element for {content:?}"));
        let start = svg[..end].rfind("<text").unwrap();
        &svg[start..end]
    }

    #[test]
    fn svg_export_draws_points_and_all_axis_labels() {
        let dataset = Dataset::new(vec![
            Record::new("Alabama", "AL", [19, 13, 38, 21, 42830, 33]),
            Record::new("Alaska", "AK", [11, 15, 33, 19, 71583, 29]),
        ]);
        let selection = Selection::new(Field::Age, Field::Obesity).unwrap();
        let config = ChartConfig::default();
        let view = ExportView {
            dataset: &dataset,
            selection,
            domain: compute_domain(&dataset, selection).unwrap(),
            config: &config,
        };

        let svg = StaticChartRenderer::render_svg_string(&view).unwrap();

        assert_eq!(svg.matches("<circle").count(), 2);
        for abbr in ["AL", "AK"] {
            assert!(svg.contains(&format!(">{abbr}</text>")), "missing {abbr}");
        }
        for field in Field::ALL {
            let element = text_element(&svg, field.display_name());
            assert_eq!(
                element.contains(r#"font-weight="bold""#),
                selection.is_active(field),
                "{field} label weight"
            );
        }
    }

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("chart.SVG")).unwrap(),
            ExportFormat::Svg
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out/chart.png")).unwrap(),
            ExportFormat::Png
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("chart.pdf")),
            Err(RenderError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
        assert!(ExportFormat::from_path(Path::new("chart")).is_err());
    }

    #[test]
    fn labels_sit_inside_the_margins() {
        let config = ChartConfig::default();
        for i in 0..3 {
            let (x, y) = StaticChartRenderer::x_label_position(&config, i);
            assert!(x > config.margin.left as i32);
            assert!(y > (config.margin.top + config.plot_height()) as i32);
            assert!(y < config.height as i32);

            let (x, y) = StaticChartRenderer::y_label_position(&config, i);
            assert!(x > 0 && x < config.margin.left as i32);
            assert!(y > config.margin.top as i32);
        }
    }

    #[test]
    fn default_label_positions_match_canvas_layout() {
        let config = ChartConfig::default();
        assert_eq!(StaticChartRenderer::x_label_position(&config, 0), (428, 430));
        assert_eq!(StaticChartRenderer::x_label_position(&config, 2), (428, 460));
        assert_eq!(StaticChartRenderer::y_label_position(&config, 1), (30, 273));
    }
}
