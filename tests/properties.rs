use hexjson::math::{hex_width, project};
use hexjson::{
    Extent, HexCell, HexJson, OffsetLayout, grid_for_hexjson, grid_key, parse_points,
    render_hexjson,
};
use proptest::prelude::*;

fn dataset(layout: usize, coords: &[(i32, i32)]) -> HexJson {
    let mut data = HexJson::new(OffsetLayout::ALL[layout % 4]);
    data.extend(
        coords
            .iter()
            .enumerate()
            .map(|(i, &(q, r))| HexCell::new(format!("H{i}"), q, r)),
    );
    data
}

fn coords() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-12i32..12, -12i32..12), 1..40)
}

proptest! {
    #[test]
    fn layout_is_deterministic(
        layout in 0usize..4,
        coords in coords(),
        w in 1.0f64..2000.0,
        h in 1.0f64..2000.0,
    ) {
        let data = dataset(layout, &coords);
        let first = render_hexjson(&data, w, h).unwrap();
        let second = render_hexjson(&data, w, h).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_outline_fits_the_canvas(
        layout in 0usize..4,
        coords in coords(),
        w in 1.0f64..2000.0,
        h in 1.0f64..2000.0,
    ) {
        let data = dataset(layout, &coords);
        let out = render_hexjson(&data, w, h).unwrap();
        let tol = 1e-9 * w.max(h);
        for hex in &out {
            for v in hex.outline(out.shape()) {
                prop_assert!(v.x >= -tol && v.x <= w + tol, "x {} outside 0..{}", v.x, w);
                prop_assert!(v.y >= -tol && v.y <= h + tol, "y {} outside 0..{}", v.y, h);
            }
        }
    }

    #[test]
    fn extent_bounds_every_coordinate(coords in coords()) {
        let extent = Extent::from_coords(coords.iter().copied()).unwrap();
        prop_assert_eq!(extent.qmin, coords.iter().map(|c| c.0).min().unwrap());
        prop_assert_eq!(extent.qmax, coords.iter().map(|c| c.0).max().unwrap());
        prop_assert_eq!(extent.rmin, coords.iter().map(|c| c.1).min().unwrap());
        prop_assert_eq!(extent.rmax, coords.iter().map(|c| c.1).max().unwrap());
        prop_assert!(coords.iter().all(|&(q, r)| extent.contains(q, r)));
    }

    #[test]
    fn grid_covers_the_extent(layout in 0usize..4, coords in coords()) {
        let data = dataset(layout, &coords);
        let extent = data.extent().unwrap();
        let grid = grid_for_hexjson(&data).unwrap();

        prop_assert_eq!(grid.layout(), data.layout());
        prop_assert_eq!(grid.len() as u64, extent.qnum() * extent.rnum());
        prop_assert_eq!(grid.extent().unwrap(), extent);
        for &(q, r) in &coords {
            let cell = grid.get(&grid_key(q, r));
            prop_assert!(cell.is_some_and(|c| (c.q, c.r) == (q, r)));
        }
    }

    #[test]
    fn grid_and_data_share_centers(
        layout in 0usize..4,
        coords in coords(),
        w in 1.0f64..2000.0,
        h in 1.0f64..2000.0,
    ) {
        let data = dataset(layout, &coords);
        let grid = grid_for_hexjson(&data).unwrap();
        let on_data = render_hexjson(&data, w, h).unwrap();
        let on_grid = render_hexjson(&grid, w, h).unwrap();

        prop_assert_eq!(on_data.shape(), on_grid.shape());
        for hex in &on_data {
            let key = grid_key(hex.q(), hex.r());
            let under = on_grid.iter().find(|g| g.key() == key).unwrap();
            prop_assert_eq!(under.center(), hex.center());
        }
    }

    #[test]
    fn points_decode_to_the_vertices(
        layout in 0usize..4,
        coords in coords(),
        w in 1.0f64..2000.0,
        h in 1.0f64..2000.0,
    ) {
        let data = dataset(layout, &coords);
        let out = render_hexjson(&data, w, h).unwrap();
        let shape = out.shape();
        let decoded = parse_points(&shape.points).unwrap();
        prop_assert_eq!(decoded.len(), 6);
        for (a, b) in decoded.iter().zip(shape.vertices) {
            prop_assert!((*a - b).length() < 1e-9 * shape.radius.max(1.0));
        }
    }

    #[test]
    fn normalized_coordinates_stay_in_the_extent(
        layout in 0usize..4,
        coords in coords(),
        w in 1.0f64..2000.0,
        h in 1.0f64..2000.0,
    ) {
        let data = dataset(layout, &coords);
        let out = render_hexjson(&data, w, h).unwrap();
        let e = *out.extent();
        for hex in &out {
            prop_assert!(i64::from(hex.qc) <= i64::from(e.qmax) - i64::from(e.qmin));
            prop_assert!(i64::from(hex.rc) <= i64::from(e.rmax) - i64::from(e.rmin));
            prop_assert_eq!(i64::from(hex.qc), i64::from(hex.q()) - i64::from(e.qmin));
            prop_assert_eq!(i64::from(hex.rc), i64::from(e.rmax) - i64::from(hex.r()));
            if hex.q() == e.qmin {
                prop_assert_eq!(hex.qc, 0);
            }
            if hex.r() == e.rmax {
                prop_assert_eq!(hex.rc, 0);
            }
        }
    }

    #[test]
    fn even_layouts_are_odd_layouts_shifted_by_one(
        qc in 0u32..500,
        rc in 0u32..500,
        radius in 0.0f64..200.0,
    ) {
        let w = hex_width(radius);
        prop_assert_eq!(
            project(OffsetLayout::OddR, w, radius, qc, rc).x,
            project(OffsetLayout::EvenR, w, radius, qc, rc + 1).x
        );
        prop_assert_eq!(
            project(OffsetLayout::OddQ, w, radius, qc, rc).y,
            project(OffsetLayout::EvenQ, w, radius, qc + 1, rc).y
        );
    }
}
