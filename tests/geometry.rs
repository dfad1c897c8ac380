use numlabel::geometry::*;

#[test]
fn test_rect_size() {
    let r = Rect::from_origin_size(3, 4, 10, 20);
    assert_eq!(r, Rect::new(3, 4, 13, 24));
    assert_eq!((r.width(), r.height()), (10, 20));
    assert!(!r.is_empty());
    assert!(Rect::new(5, 5, 5, 9).is_empty());
    assert!(Rect::new(5, 5, 2, 9).is_empty());
}

#[test]
fn test_rect_translate() {
    let r = Rect::new(0, 0, 4, 4).translate(-2, 3);
    assert_eq!(r, Rect::new(-2, 3, 2, 7));
}

#[test]
fn test_rect_touching_edges_do_not_overlap() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.overlaps(&Rect::new(10, 0, 20, 10)));
    assert!(!a.overlaps(&Rect::new(0, 10, 10, 20)));
    assert!(a.overlaps(&Rect::new(9, 9, 20, 20)));
}

#[test]
fn test_rect_contains() {
    let outer = Rect::new(0, 0, 10, 10);
    assert!(outer.contains(&outer));
    assert!(outer.contains(&Rect::new(2, 2, 5, 5)));
    assert!(!outer.contains(&Rect::new(8, 8, 11, 9)));
}

#[test]
fn test_distance_to_segment() {
    let d = distance_to_segment([5.0, 3.0], [0.0, 0.0], [10.0, 0.0]);
    assert!((d - 3.0).abs() < 1e-6);
    // Beyond the end the nearest point is the endpoint.
    let d = distance_to_segment([13.0, 4.0], [0.0, 0.0], [10.0, 0.0]);
    assert!((d - 5.0).abs() < 1e-6);
}

#[test]
fn test_distance_to_degenerate_segment() {
    let d = distance_to_segment([3.0, 4.0], [0.0, 0.0], [0.0, 0.0]);
    assert!((d - 5.0).abs() < 1e-6);
}
