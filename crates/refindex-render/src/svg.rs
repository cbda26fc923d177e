use refindex_core::Point;

use crate::context::RenderContext;

const LEGEND_LABEL: &str = "beam trajectory";

fn rgb(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgb({},{},{})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2])
    )
}

/// Emit the figure as a standalone SVG document.
///
/// The container keeps its left, right and bottom walls; the open top is left
/// undrawn. Beams are clipped to the container.
pub fn render_svg(ctx: &RenderContext) -> String {
    let style = ctx.style();
    let size = ctx.canvas_size();
    let m = style.margin;
    let inner_w = ctx.width() * style.scale;
    let inner_h = ctx.height() * style.scale;

    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.2} {:.2}\">\n",
        size.x, size.y, size.x, size.y
    ));
    out.push_str(&format!(
        "  <defs><clipPath id=\"container\"><rect x=\"{m:.2}\" y=\"{m:.2}\" width=\"{inner_w:.2}\" height=\"{inner_h:.2}\"/></clipPath></defs>\n"
    ));
    out.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

    out.push_str("  <g id=\"layers\">\n");
    for band in ctx.bands() {
        let top_left = ctx.to_pixels(Point::new(0.0, band.y_top));
        let band_h = (band.y_top - band.y_bottom) * style.scale;
        out.push_str(&format!(
            "    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"{:.2}\"/>\n",
            top_left.x,
            top_left.y,
            inner_w,
            band_h,
            rgb(band.color),
            band.color[3]
        ));
    }
    out.push_str("  </g>\n");

    out.push_str("  <g id=\"beams\" clip-path=\"url(#container)\">\n");
    for line in ctx.polylines() {
        let points: Vec<String> = line
            .points
            .iter()
            .map(|&p| {
                let px = ctx.to_pixels(p);
                format!("{:.2},{:.2}", px.x, px.y)
            })
            .collect();
        out.push_str(&format!(
            "    <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            points.join(" "),
            rgb(line.color),
            style.beam_width
        ));
        if line.markers {
            for &p in &line.points {
                let px = ctx.to_pixels(p);
                out.push_str(&format!(
                    "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
                    px.x,
                    px.y,
                    style.marker_radius,
                    rgb(line.color)
                ));
            }
        }
    }
    out.push_str("  </g>\n");

    let (left, right, bottom) = (m, m + inner_w, m + inner_h);
    out.push_str("  <g id=\"walls\" stroke=\"black\" stroke-width=\"1\">\n");
    for (x1, y1, x2, y2) in [
        (left, m, left, bottom),
        (right, m, right, bottom),
        (left, bottom, right, bottom),
    ] {
        out.push_str(&format!(
            "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
            x1, y1, x2, y2
        ));
    }
    out.push_str("  </g>\n");

    if let Some(first) = ctx.polylines().first() {
        let x = right - 130.0;
        let y = m + 16.0;
        out.push_str(&format!(
            "  <g id=\"legend\"><line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            x,
            y,
            x + 20.0,
            y,
            rgb(first.color),
            style.beam_width
        ));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" font-size=\"12\">{}</text></g>\n",
            x + 26.0,
            y + 4.0,
            LEGEND_LABEL
        ));
    }

    out.push_str("</svg>\n");
    out
}
