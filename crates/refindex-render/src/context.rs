use refindex_core::{Medium, Point};
use refindex_trace::Trajectory;

use crate::palette::band_colors;
use crate::svg;

/// Drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Pixels per container unit.
    pub scale: f64,
    /// Blank border around the container, in pixels.
    pub margin: f64,
    /// Opacity applied to every band color.
    pub band_alpha: f32,
    pub beam_color: [f32; 4],
    pub beam_width: f64,
    pub marker_radius: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            scale: 20.0,
            margin: 10.0,
            band_alpha: 0.5,
            beam_color: [1.0, 0.0, 0.0, 1.0], // red
            beam_width: 1.0,
            marker_radius: 2.5,
        }
    }
}

/// A filled horizontal band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub y_bottom: f64,
    pub y_top: f64,
    pub color: [f32; 4],
}

/// A beam trajectory to overlay on the bands.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub color: [f32; 4],
    pub markers: bool,
}

/// Caller-owned drawing surface for one figure.
///
/// Each context holds its own bands and overlays; two contexts never share
/// state, so independent experiments can be drawn side by side.
#[derive(Debug, Clone)]
pub struct RenderContext {
    width: f64,
    height: f64,
    style: RenderStyle,
    bands: Vec<Band>,
    polylines: Vec<Polyline>,
}

impl RenderContext {
    /// Start a figure with the medium's layers already shaded.
    pub fn new(medium: &Medium, style: RenderStyle) -> Self {
        let container = medium.container();
        let bands = medium
            .layers()
            .iter()
            .zip(band_colors(medium.n_layers()))
            .map(|(layer, color)| Band {
                y_bottom: layer.y_bottom,
                y_top: layer.y_top,
                color: [color[0], color[1], color[2], style.band_alpha],
            })
            .collect();
        Self {
            width: container.width(),
            height: container.height(),
            style,
            bands,
            polylines: Vec::new(),
        }
    }

    /// Overlay a trajectory, optionally marking every incidence point.
    pub fn draw_trajectory(&mut self, trajectory: &Trajectory, show_incidence_points: bool) {
        if trajectory.len() < 2 {
            log::warn!("Skipping trajectory with {} point(s), nothing to draw", trajectory.len());
            return;
        }
        self.polylines.push(Polyline {
            points: trajectory.points().to_vec(),
            color: self.style.beam_color,
            markers: show_incidence_points,
        });
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    /// Container coordinates to SVG pixels (y flipped, origin at the top-left).
    pub fn to_pixels(&self, p: Point) -> Point {
        Point::new(
            self.style.margin + p.x * self.style.scale,
            self.style.margin + (self.height - p.y) * self.style.scale,
        )
    }

    /// Figure size in pixels.
    pub fn canvas_size(&self) -> Point {
        Point::new(
            self.width * self.style.scale + 2.0 * self.style.margin,
            self.height * self.style.scale + 2.0 * self.style.margin,
        )
    }

    pub fn to_svg(&self) -> String {
        svg::render_svg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refindex_core::{Beam, Container};
    use refindex_trace::{trace, TraceOptions};

    fn medium() -> Medium {
        let container = Container::new(40.0, 25.0).expect("valid container");
        Medium::new(container, 15, 1.0, 1.5).expect("valid medium")
    }

    #[test]
    fn test_bands_follow_layers() {
        let medium = medium();
        let ctx = RenderContext::new(&medium, RenderStyle::default());
        assert_eq!(ctx.bands().len(), 15);
        for (band, layer) in ctx.bands().iter().zip(medium.layers()) {
            assert_eq!(band.y_bottom, layer.y_bottom);
            assert_eq!(band.y_top, layer.y_top);
            assert_eq!(band.color[3], 0.5);
        }
    }

    #[test]
    fn test_pixels_flip_y() {
        let ctx = RenderContext::new(&medium(), RenderStyle::default());
        assert_eq!(ctx.to_pixels(Point::new(0.0, 25.0)), Point::new(10.0, 10.0));
        assert_eq!(ctx.to_pixels(Point::new(40.0, 0.0)), Point::new(810.0, 510.0));
        assert_eq!(ctx.canvas_size(), Point::new(820.0, 520.0));
    }

    #[test]
    fn test_contexts_are_independent() {
        let medium = medium();
        let beam = Beam::new(550.0, 0.3, 12.0).expect("valid beam");
        let trajectory = trace(&medium, &beam, &TraceOptions::default()).expect("traces");

        let mut a = RenderContext::new(&medium, RenderStyle::default());
        let b = RenderContext::new(&medium, RenderStyle::default());
        a.draw_trajectory(&trajectory, true);

        assert_eq!(a.polylines().len(), 1);
        assert!(a.polylines()[0].markers);
        assert!(b.polylines().is_empty());
    }
}
