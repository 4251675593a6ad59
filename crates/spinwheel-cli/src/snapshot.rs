use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use skia_safe::{
    Canvas, Color, EncodedImageFormat, Font, FontMgr, FontStyle, Paint, PaintStyle, PathBuilder,
    Rect, TileMode, gradient_shader, surfaces::raster_n32_premul,
};
use spinwheel_core::{Fill, Point, Primitive};

const POINTER_COLOR: Color = Color::from_rgb(220, 40, 40);

/// Renders `primitives` rotated by `angle` around `center`, adds the fixed
/// pointer and writes the result as PNG.
pub fn save_png(
    primitives: &[Primitive],
    angle: f64,
    center: Point,
    radius: f64,
    path: &Path,
) -> Result<()> {
    let side = (center.x.max(center.y) * 2.0).ceil() as i32;
    let mut surface = raster_n32_premul((side, side)).context("failed to create surface")?;
    let canvas = surface.canvas();
    canvas.clear(Color::TRANSPARENT);

    let font = FontMgr::new()
        .legacy_make_typeface(None, FontStyle::default())
        .map(|typeface| Font::from_typeface(typeface, None));

    // The wheel turns; the pointer does not.
    canvas.save();
    canvas.rotate(angle as f32, Some(sk_point(center)));
    for primitive in primitives {
        draw_primitive(canvas, primitive, font.as_ref());
    }
    canvas.restore();

    draw_pointer(canvas, center, radius);

    let image = surface.image_snapshot();
    let data = image
        .encode(None, EncodedImageFormat::PNG, 100)
        .context("failed to encode image")?;

    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

fn sk_point(p: Point) -> skia_safe::Point {
    skia_safe::Point::new(p.x as f32, p.y as f32)
}

fn sk_color(c: spinwheel_core::Color) -> Color {
    Color::from_argb(c.a, c.r, c.g, c.b)
}

fn paint(color: spinwheel_core::Color, style: PaintStyle) -> Paint {
    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(style);
    paint.set_color(sk_color(color));
    paint
}

fn oval(center: Point, radius: f64) -> Rect {
    Rect::from_xywh(
        (center.x - radius) as f32,
        (center.y - radius) as f32,
        (radius * 2.0) as f32,
        (radius * 2.0) as f32,
    )
}

fn draw_primitive(canvas: &Canvas, primitive: &Primitive, font: Option<&Font>) {
    match primitive {
        Primitive::Background {
            center,
            radius,
            color,
        }
        | Primitive::CornerGlow {
            center,
            radius,
            color,
        }
        | Primitive::CornerPoint {
            center,
            radius,
            color,
        }
        | Primitive::CenterPoint {
            center,
            radius,
            color,
        } => {
            canvas.draw_circle(sk_point(*center), *radius as f32, &paint(*color, PaintStyle::Fill));
        }
        Primitive::StrokeRing {
            center,
            radius,
            thickness,
            color,
        } => {
            let mut ring = paint(*color, PaintStyle::Stroke);
            ring.set_stroke_width(*thickness as f32);
            canvas.draw_circle(sk_point(*center), *radius as f32, &ring);
        }
        Primitive::Wedge {
            center,
            radius,
            start_degrees,
            sweep_degrees,
            fill,
            ..
        } => {
            let wedge = match fill {
                Fill::Solid(color) => paint(*color, PaintStyle::Fill),
                Fill::RadialGradient {
                    colors,
                    center,
                    radius,
                } => {
                    let colors: Vec<Color> = colors.iter().copied().map(sk_color).collect();
                    let mut paint = Paint::default();
                    paint.set_anti_alias(true);
                    paint.set_shader(gradient_shader::radial(
                        sk_point(*center),
                        *radius as f32,
                        &colors[..],
                        None,
                        TileMode::Clamp,
                        None,
                        None,
                    ));
                    paint
                }
            };
            canvas.draw_arc(
                oval(*center, *radius),
                *start_degrees as f32,
                *sweep_degrees as f32,
                true,
                &wedge,
            );
        }
        Primitive::Label {
            text,
            position,
            rotation_degrees,
            color,
            size,
            ..
        } => {
            let Some(font) = font else {
                return;
            };
            let font = font.with_size(*size).unwrap_or_else(|| font.clone());
            let label = paint(*color, PaintStyle::Fill);
            let (width, bounds) = font.measure_str(text, Some(&label));

            // Local transform at the label anchor, text centered on it.
            canvas.save();
            canvas.translate(sk_point(*position));
            canvas.rotate(*rotation_degrees as f32, None);
            canvas.draw_str(
                text,
                (-width / 2.0, -bounds.center_y()),
                &font,
                &label,
            );
            canvas.restore();
        }
        Primitive::Separator {
            from,
            to,
            thickness,
            color,
        } => {
            let mut line = paint(*color, PaintStyle::Stroke);
            line.set_stroke_width(*thickness as f32);
            canvas.draw_line(sk_point(*from), sk_point(*to), &line);
        }
    }
}

fn draw_pointer(canvas: &Canvas, center: Point, radius: f64) {
    let [tip, left, right] = crate::pointer_triangle(center, radius);

    let mut builder = PathBuilder::new();
    builder.move_to(sk_point(tip));
    builder.line_to(sk_point(left));
    builder.line_to(sk_point(right));
    builder.close();
    let path = builder.detach();

    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(POINTER_COLOR);
    canvas.draw_path(&path, &paint);
}
