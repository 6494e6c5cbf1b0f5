//! Property tests over generated multi-point layer files

mod common;

use common::builders::multipoint_shape;
use common::LayerFixture;
use hydrolayer::{read_layer, BoundingBox2D, Vector2};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    (-18000i32..18000).prop_map(|v| f64::from(v) / 100.0)
}

fn shapes() -> impl Strategy<Value = Vec<Vec<(f64, f64)>>> {
    prop::collection::vec(
        prop::collection::vec((coordinate(), coordinate()), 1..8),
        0..12,
    )
}

fn layer_text(shapes: &[Vec<(f64, f64)>]) -> String {
    shapes
        .iter()
        .enumerate()
        .map(|(i, vertices)| {
            let id = format!("S{}", i);
            multipoint_shape([id.as_str(), "Name", "0"], vertices)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn layer_bounds_fold_shape_bounds(shapes in shapes()) {
        let fixture = LayerFixture::new();
        let path = fixture.write("county.dat", layer_text(&shapes));
        let layer = read_layer(&path, true).unwrap();

        let folded = layer
            .shapes()
            .iter()
            .fold(BoundingBox2D::EMPTY, |acc, shape| acc.merge(&shape.bounds()));
        prop_assert_eq!(layer.bounds(), folded);

        for shape in layer.shapes() {
            let bounds = shape.bounds();
            for vertex in shape.vertices() {
                prop_assert!(bounds.contains(*vertex));
            }
        }
    }

    #[test]
    fn shape_indices_are_dense(shapes in shapes()) {
        let fixture = LayerFixture::new();
        let path = fixture.write("state.dat", layer_text(&shapes));
        let layer = read_layer(&path, true).unwrap();

        prop_assert_eq!(layer.len(), shapes.len());
        prop_assert_eq!(layer.attributes().unwrap().len(), shapes.len());
        for (i, shape) in layer.shapes().iter().enumerate() {
            prop_assert_eq!(shape.index(), i);
            prop_assert_eq!(shape.vertices().len(), shapes[i].len());
        }
    }

    #[test]
    fn county_vertices_keep_file_order(shapes in shapes()) {
        let fixture = LayerFixture::new();
        let path = fixture.write("county.dat", layer_text(&shapes));
        let layer = read_layer(&path, false).unwrap();

        for (shape, expected) in layer.shapes().iter().zip(&shapes) {
            let expected: Vec<Vector2> = expected.iter().map(|&p| Vector2::from(p)).collect();
            prop_assert_eq!(shape.vertices(), expected.as_slice());
        }
    }
}
