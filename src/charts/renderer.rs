//! Static Chart Renderer
//! Draws a [`Frame`] as SVG using plotters.
//!
//! Layout:
//! 1. Title centered in the top margin
//! 2. Axes with tick labels (bottom and left)
//! 3. Marks: bars or circles, with black circle outlines
//! 4. Legend in the top-right corner (scatterplot only)

use crate::charts::frame::{Axis, AxisSide, Frame, LegendEntry};
use crate::charts::marks::{Mark, Shape};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

const TICK_LEN: i32 = 6;
const FONT: &str = "sans-serif";

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a frame to an SVG document in memory.
    pub fn render_to_string(frame: &Frame) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (frame.layout.width, frame.layout.height))
                .into_drawing_area();
            Self::draw_frame(&root, frame)?;
            root.present().map_err(draw_err)?;
        }
        Ok(svg)
    }

    /// Render a frame to an SVG file.
    pub fn render_to_file(frame: &Frame, path: &Path) -> Result<(), RenderError> {
        let svg = Self::render_to_string(frame)?;
        std::fs::write(path, svg)?;
        Ok(())
    }

    fn draw_frame<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        frame: &Frame,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;

        let title_style = (FONT, 20).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            frame.title.clone(),
            (frame.layout.width as i32 / 2, (frame.layout.margin.top / 2.0).max(10.0) as i32),
            title_style,
        ))
        .map_err(draw_err)?;

        for axis in &frame.axes {
            Self::draw_axis(root, axis)?;
        }

        for mark in &frame.marks {
            Self::draw_mark(root, mark)?;
        }

        let legend_x = frame.layout.width as i32 - frame.layout.margin.right as i32 - 150;
        for (i, entry) in frame.legend.iter().enumerate() {
            Self::draw_legend_entry(root, entry, legend_x, 20 + i as i32 * 20)?;
        }

        Ok(())
    }

    fn draw_axis<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        axis: &Axis,
    ) -> Result<(), RenderError> {
        let offset = axis.offset.round() as i32;
        let (s0, s1) = (axis.span.0.round() as i32, axis.span.1.round() as i32);
        let label_font = (FONT, 11).into_font().color(&BLACK);

        match axis.side {
            AxisSide::Bottom => {
                root.draw(&PathElement::new(vec![(s0, offset), (s1, offset)], &BLACK))
                    .map_err(draw_err)?;
                for (pos, label) in &axis.ticks {
                    let x = pos.round() as i32;
                    root.draw(&PathElement::new(vec![(x, offset), (x, offset + TICK_LEN)], &BLACK))
                        .map_err(draw_err)?;
                    let style = if axis.vertical_labels {
                        label_font
                            .transform(FontTransform::Rotate270)
                            .pos(Pos::new(HPos::Right, VPos::Center))
                    } else {
                        label_font.pos(Pos::new(HPos::Center, VPos::Top))
                    };
                    root.draw(&Text::new(label.clone(), (x, offset + TICK_LEN + 3), style))
                        .map_err(draw_err)?;
                }
            }
            AxisSide::Left => {
                root.draw(&PathElement::new(vec![(offset, s0), (offset, s1)], &BLACK))
                    .map_err(draw_err)?;
                for (pos, label) in &axis.ticks {
                    let y = pos.round() as i32;
                    root.draw(&PathElement::new(vec![(offset - TICK_LEN, y), (offset, y)], &BLACK))
                        .map_err(draw_err)?;
                    root.draw(&Text::new(
                        label.clone(),
                        (offset - TICK_LEN - 3, y),
                        label_font.pos(Pos::new(HPos::Right, VPos::Center)),
                    ))
                    .map_err(draw_err)?;
                }
            }
        }
        Ok(())
    }

    fn draw_mark<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        mark: &Mark,
    ) -> Result<(), RenderError> {
        if !mark.x.is_finite() || !mark.y.is_finite() {
            return Ok(());
        }
        let (r, g, b) = mark.fill.rgb();
        let fill = RGBColor(r, g, b).mix(mark.opacity).filled();
        let (x, y) = (mark.x.round() as i32, mark.y.round() as i32);

        match mark.shape {
            Shape::Bar { width, height } => {
                let corner = ((mark.x + width).round() as i32, (mark.y + height).round() as i32);
                root.draw(&Rectangle::new([(x, y), corner], fill))
                    .map_err(draw_err)?;
            }
            Shape::Point { radius } => {
                let radius = radius.round() as i32;
                root.draw(&Circle::new((x, y), radius, fill))
                    .map_err(draw_err)?;
                root.draw(&Circle::new(
                    (x, y),
                    radius,
                    BLACK.mix(mark.opacity).stroke_width(1),
                ))
                .map_err(draw_err)?;
            }
        }
        Ok(())
    }

    fn draw_legend_entry<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        entry: &LegendEntry,
        x: i32,
        y: i32,
    ) -> Result<(), RenderError> {
        let (r, g, b) = entry.fill.rgb();
        root.draw(&Circle::new((x, y), 5, RGBColor(r, g, b).filled()))
            .map_err(draw_err)?;
        root.draw(&Circle::new((x, y), 5, BLACK.stroke_width(1)))
            .map_err(draw_err)?;
        root.draw(&Text::new(
            entry.label.clone(),
            (x + 10, y),
            (FONT, 12).into_font().color(&BLACK).pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(draw_err)?;
        Ok(())
    }
}
