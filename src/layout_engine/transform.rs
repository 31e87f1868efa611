use crate::sys::geometry::{Point, Rect};

/// Maps `point` from `src` into `dst`, keeping its relative position.
///
/// Each axis is scaled independently and the result truncated to whole
/// pixels. Returns `None` when `src` is degenerate on either axis or does not
/// contain `point`.
pub fn transform_point(point: Point, src: Rect, dst: Rect) -> Option<Point> {
    if src.width() == 0 || src.height() == 0 || !src.contains(point) {
        return None;
    }
    let x_frac = f64::from(point.x - src.left()) / f64::from(src.width());
    let y_frac = f64::from(point.y - src.top()) / f64::from(src.height());
    let x = f64::from(dst.left()) + f64::from(dst.width()) * x_frac;
    let y = f64::from(dst.top()) + f64::from(dst.height()) * y_frac;
    Some(Point::new(x as i32, y as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_maps_to_center() {
        let src = Rect::new(100, 100, 800, 600);
        let dst = Rect::new(0, 0, 960, 540);
        let got = transform_point(src.center(), src, dst).unwrap();
        let want = dst.center();
        assert!((got.x - want.x).abs() <= 1 && (got.y - want.y).abs() <= 1, "{got} vs {want}");
    }

    #[test]
    fn corners_map_to_corners() {
        let src = Rect::new(10, 20, 100, 50);
        let dst = Rect::new(1920, 0, 1920, 1040);
        assert_eq!(transform_point(Point::new(10, 20), src, dst), Some(Point::new(1920, 0)));
        assert_eq!(
            transform_point(Point::new(60, 45), src, dst),
            Some(Point::new(2880, 520))
        );
    }

    #[test]
    fn degenerate_source_has_no_transform() {
        let dst = Rect::new(0, 0, 100, 100);
        assert_eq!(transform_point(Point::new(5, 5), Rect::new(0, 0, 0, 10), dst), None);
        assert_eq!(transform_point(Point::new(5, 5), Rect::new(0, 0, 10, 0), dst), None);
    }

    #[test]
    fn points_outside_the_source_have_no_transform() {
        let src = Rect::new(100, 100, 200, 200);
        let dst = Rect::new(0, 0, 960, 1040);
        assert_eq!(transform_point(Point::new(99, 150), src, dst), None);
        assert_eq!(transform_point(Point::new(300, 150), src, dst), None);
        assert_eq!(transform_point(Point::new(150, 300), src, dst), None);
    }

    #[test]
    fn it_truncates_towards_zero() {
        let src = Rect::new(0, 0, 3, 3);
        let dst = Rect::new(0, 0, 10, 10);
        // 10 * 1/3 = 3.33..
        assert_eq!(transform_point(Point::new(1, 1), src, dst), Some(Point::new(3, 3)));
    }
}
