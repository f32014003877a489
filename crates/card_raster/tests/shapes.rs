// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::util::{check_ref, is_white, white_canvas, BLACK, WHITE};
use card_raster::peniko::color::{palette, AlphaColor, Srgb};
use card_raster::{BarbellGeometry, FillSpec, Pixmap, Point, Primitive, Resample, ShapeRasterizer};

mod util;

const RED: AlphaColor<Srgb> = AlphaColor::from_rgba8(0x9C, 0x33, 0x27, 0xFF);
const CENTER: Point = Point::new(40, 40);

fn primitives() -> [Primitive; 6] {
    [
        Primitive::RoundedRect {
            width: 60.0,
            height: 30.0,
            rounding: 1.0,
        },
        Primitive::RoundedRect {
            width: 50.0,
            height: 50.0,
            rounding: 0.3,
        },
        Primitive::Diamond {
            radius: 25.0,
            stretch: 1.25,
        },
        Primitive::Circle { radius: 27.0 },
        Primitive::Square { radius: 20.0 },
        Primitive::Triangle {
            radius: 30.0,
            flip: false,
        },
    ]
}

fn draw(r: &ShapeRasterizer, primitive: &Primitive, style: &FillSpec) -> Pixmap {
    let mut canvas = white_canvas(80, 80);
    r.layer(primitive, CENTER, style).unwrap().composite(&mut canvas);
    canvas
}

#[test]
fn border_keeps_outer_bounds() {
    for resample in [Resample::Area, Resample::Lanczos3] {
        let r = ShapeRasterizer::new(4, resample);

        for primitive in primitives() {
            let plain = draw(&r, &primitive, &FillSpec::solid(RED));
            let bordered = draw(&r, &primitive, &FillSpec::bordered(RED, 3.0, BLACK));

            let bounds = plain.bounds_where(|px| !is_white(px));
            assert!(bounds.is_some(), "{primitive:?} rendered nothing");
            assert_eq!(
                bounds,
                bordered.bounds_where(|px| !is_white(px)),
                "{primitive:?} with {resample:?}"
            );
        }
    }
}

#[test]
fn border_is_drawn_inward() {
    let r = ShapeRasterizer::default();
    let square = Primitive::Square { radius: 20.0 };
    let canvas = draw(&r, &square, &FillSpec::bordered(WHITE, 5.0, BLACK));

    // The square covers 20..60 on both axes.
    assert_eq!(canvas.pixel(19, 40), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(20, 40), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(24, 40), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(25, 40), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(59, 40), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(40, 55), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(40, 54), Some([255, 255, 255, 255]));
}

#[test]
fn full_rounding_matches_circle() {
    let r = ShapeRasterizer::default();
    let style = FillSpec::solid(BLACK);

    let rect = draw(
        &r,
        &Primitive::RoundedRect {
            width: 50.0,
            height: 50.0,
            rounding: 1.0,
        },
        &style,
    );
    let circle = draw(&r, &Primitive::Circle { radius: 25.0 }, &style);

    let max_diff = rect
        .data()
        .iter()
        .zip(circle.data())
        .map(|(a, b)| a.abs_diff(*b))
        .max()
        .unwrap();

    assert!(max_diff <= 64, "max channel difference {max_diff}");
}

#[test]
fn diamond_box() {
    let r = ShapeRasterizer::default();
    let layer = r
        .layer(
            &Primitive::Diamond {
                radius: 20.0,
                stretch: 1.25,
            },
            CENTER,
            &FillSpec::solid(BLACK),
        )
        .unwrap();

    assert_eq!((layer.pixmap.width(), layer.pixmap.height()), (40, 50));
    assert_eq!((layer.x, layer.y), (20, 15));

    // Vertices touch the middle of each side; corners stay empty.
    assert_eq!(layer.pixmap.pixel(20, 25), Some([0, 0, 0, 255]));
    assert_eq!(layer.pixmap.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(layer.pixmap.pixel(39, 49), Some([0, 0, 0, 0]));
    assert!(layer.pixmap.pixel(20, 0).unwrap()[3] > 0);
    assert!(layer.pixmap.pixel(0, 25).unwrap()[3] > 0);
}

#[test]
fn oversized_border_fills_shape() {
    let r = ShapeRasterizer::default();
    let canvas = draw(
        &r,
        &Primitive::Circle { radius: 6.0 },
        &FillSpec::bordered(RED, 20.0, BLACK),
    );

    assert_eq!(canvas.pixel(40, 40), Some([0, 0, 0, 255]));
    assert!(canvas
        .data()
        .chunks_exact(4)
        .all(|px| px[0] == px[1] && px[1] == px[2]));
}

#[test]
fn triangle_flip_mirrors() {
    let r = ShapeRasterizer::new(4, Resample::Area);
    let style = FillSpec::solid(BLACK);
    let up = draw(&r, &Primitive::Triangle { radius: 30.0, flip: false }, &style);
    let down = draw(&r, &Primitive::Triangle { radius: 30.0, flip: true }, &style);

    let (_, up_top, _, up_bottom) = up.bounds_where(|px| !is_white(px)).unwrap();
    let (_, down_top, _, down_bottom) = down.bounds_where(|px| !is_white(px)).unwrap();

    // Point-up triangles extend further above the center than below it.
    assert!(40 - up_top > up_bottom - 40);
    assert!(down_bottom - 40 > 40 - down_top);
    assert_eq!(up_bottom - up_top, down_bottom - down_top);
}

#[test]
fn barbell_parts() {
    let r = ShapeRasterizer::default();
    let geometry = BarbellGeometry::default();
    let center = Point::new(100, 40);

    let solid = r
        .barbell_layers(center, &geometry, 6.0, &FillSpec::solid(RED))
        .unwrap();
    assert_eq!(solid.len(), 3);

    let hollow = r
        .barbell_layers(center, &geometry, 6.0, &FillSpec::bordered(WHITE, 10.0, RED))
        .unwrap();
    assert_eq!(hollow.len(), 5);

    let mut canvas = white_canvas(200, 80);
    r.barbell(&mut canvas, center, &geometry, 6.0, &FillSpec::solid(RED))
        .unwrap();

    let (x0, y0, x1, y1) = canvas.bounds_where(|px| !is_white(px)).unwrap();
    assert_eq!(x1 - x0, geometry.width() as usize);
    assert_eq!(y1 - y0, geometry.height() as usize);
}

#[test]
fn supersampling_changes_edges_only() {
    let style = FillSpec::solid(BLACK);
    let circle = Primitive::Circle { radius: 27.0 };
    let coarse = draw(&ShapeRasterizer::new(2, Resample::Area), &circle, &style);
    let fine = draw(&ShapeRasterizer::new(8, Resample::Area), &circle, &style);

    assert_eq!(coarse.pixel(40, 40), fine.pixel(40, 40));
    assert_eq!(coarse.pixel(0, 0), fine.pixel(0, 0));
}

#[test]
fn shape_refs() {
    let r = ShapeRasterizer::default();
    let shapes = [
        Primitive::RoundedRect {
            width: 60.0,
            height: 30.0,
            rounding: 0.0,
        },
        Primitive::Diamond {
            radius: 25.0,
            stretch: 1.25,
        },
        Primitive::Square { radius: 20.0 },
        Primitive::Diamond {
            radius: 20.0,
            stretch: 0.6,
        },
    ];

    for (i, primitive) in shapes.iter().enumerate() {
        let canvas = draw(
            &r,
            primitive,
            &FillSpec::bordered(palette::css::GOLD, 4.0, palette::css::NAVY),
        );
        check_ref(&canvas, &format!("shape_{i}"));
    }
}
