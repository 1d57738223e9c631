//! Connectivity reduction
//!
//! Strips, fans and polygons keep their own connectivity convention on the
//! wire, minus degenerate triangles. After a degenerate window the next
//! valid triangle is emitted in full ("resume"); while triangles keep
//! coming, only the newest vertex is emitted ("continue").
//!
//! A resume that follows earlier output is preceded by a degenerate bridge
//! whenever the joined list would otherwise form a triangle that was not
//! in the input.

use crate::geometry::PrimitiveType;

#[inline]
fn is_degenerate(a: u16, b: u16, c: u16) -> bool {
    a == b || b == c || a == c
}

/// Reduce a primitive's index list to its wire form
pub fn reduce(shape: PrimitiveType, indices: &[u16]) -> Vec<u16> {
    match shape {
        PrimitiveType::Triangles => indices.to_vec(),
        PrimitiveType::TriangleStrip => reduce_strip(indices),
        PrimitiveType::TriangleFan | PrimitiveType::ConvexPolygon => reduce_fan(indices),
    }
}

/// Drop degenerate windows from a triangle strip
pub fn reduce_strip(indices: &[u16]) -> Vec<u16> {
    let mut out = Vec::with_capacity(indices.len());
    let mut continuing = false;

    for w in indices.windows(3) {
        let (a, b, c) = (w[0], w[1], w[2]);
        if is_degenerate(a, b, c) {
            continuing = false;
            continue;
        }
        if continuing {
            out.push(c);
        } else {
            bridge_strip(&mut out, a, b);
            out.extend_from_slice(&[a, b, c]);
            continuing = true;
        }
    }

    out
}

/// Separate a resumed strip run `a, b, ..` from the output emitted so far
///
/// Joining `.., x, y` to `a, b, ..` adds the windows `(x, y, a)` and
/// `(y, a, b)`. If either is a real triangle, `y, a` is repeated so that
/// every window across the seam repeats a vertex.
fn bridge_strip(out: &mut Vec<u16>, a: u16, b: u16) {
    let &[.., x, y] = out.as_slice() else {
        return;
    };
    if !is_degenerate(x, y, a) || !is_degenerate(y, a, b) {
        out.extend_from_slice(&[y, a]);
    }
}

/// Drop degenerate windows from a fan around the first index
///
/// The apex is written once, ahead of the first valid triangle. A fan with
/// no valid triangle reduces to an empty list. When a resumed run does not
/// start on the last emitted rim vertex, the apex is repeated in between so
/// the seam pairs `(last, apex)` and `(apex, b)` stay degenerate.
pub fn reduce_fan(indices: &[u16]) -> Vec<u16> {
    let Some((&apex, rest)) = indices.split_first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(indices.len());
    let mut continuing = false;

    for w in rest.windows(2) {
        let (b, c) = (w[0], w[1]);
        if is_degenerate(apex, b, c) {
            continuing = false;
            continue;
        }
        if continuing {
            out.push(c);
        } else {
            if out.last() != Some(&b) {
                out.push(apex);
            }
            out.extend_from_slice(&[b, c]);
            continuing = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Non-degenerate triangles a strip reader would produce, vertex-sorted
    fn strip_triangles(indices: &[u16]) -> Vec<[u16; 3]> {
        indices
            .windows(3)
            .filter(|w| !is_degenerate(w[0], w[1], w[2]))
            .map(|w| sorted([w[0], w[1], w[2]]))
            .collect()
    }

    fn fan_triangles(indices: &[u16]) -> Vec<[u16; 3]> {
        let Some((&apex, rest)) = indices.split_first() else {
            return Vec::new();
        };
        rest.windows(2)
            .filter(|w| !is_degenerate(apex, w[0], w[1]))
            .map(|w| sorted([apex, w[0], w[1]]))
            .collect()
    }

    fn sorted(mut t: [u16; 3]) -> [u16; 3] {
        t.sort_unstable();
        t
    }

    #[test]
    fn test_triangles_pass_through() {
        let indices = [0, 1, 2, 2, 2, 3];
        assert_eq!(reduce(PrimitiveType::Triangles, &indices), indices.to_vec());
    }

    #[test]
    fn test_strip_degenerate_middle_resumes_fresh() {
        let out = reduce_strip(&[0, 1, 2, 2, 3, 4]);
        assert_eq!(out, vec![0, 1, 2, 2, 3, 4]);
        assert_eq!(strip_triangles(&out), vec![[0, 1, 2], [2, 3, 4]]);
    }

    #[test]
    fn test_strip_without_degenerates_is_unchanged() {
        assert_eq!(reduce_strip(&[0, 1, 2, 3, 4]), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_strip_leading_degenerate_dropped() {
        assert_eq!(reduce_strip(&[0, 0, 1, 2]), vec![0, 1, 2]);
        assert_eq!(reduce_strip(&[0, 1, 1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_strip_all_degenerate_is_empty() {
        assert!(reduce_strip(&[0, 0, 0, 0]).is_empty());
        assert!(reduce_strip(&[5, 6]).is_empty());
    }

    #[test]
    fn test_strip_preserves_valid_triangles() {
        let input = [0, 1, 2, 1, 3, 3, 4, 5, 6, 6, 6, 7, 8];
        let out = reduce_strip(&input);
        assert_eq!(strip_triangles(&out), strip_triangles(&input));
    }

    #[test]
    fn test_strip_repeated_degenerates_do_not_join_triangles() {
        let input = [0, 1, 2, 2, 3, 2, 4];
        let out = reduce_strip(&input);
        assert_eq!(out, vec![0, 1, 2, 2, 3, 3, 2, 4]);
        assert_eq!(strip_triangles(&out), vec![[0, 1, 2], [2, 3, 4]]);
        assert_eq!(strip_triangles(&out), strip_triangles(&input));
    }

    #[test]
    fn test_strip_bridge_then_continue() {
        let input = [4, 5, 6, 6, 7, 6, 8, 9];
        let out = reduce_strip(&input);
        assert_eq!(out, vec![4, 5, 6, 6, 7, 7, 6, 8, 9]);
        assert_eq!(strip_triangles(&out), strip_triangles(&input));
    }

    #[test]
    fn test_fan_without_degenerates() {
        let out = reduce_fan(&[0, 1, 2, 3]);
        assert_eq!(out, vec![0, 1, 2, 3]);
        assert_eq!(fan_triangles(&out), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_fan_degenerate_pair_resumes() {
        let out = reduce_fan(&[0, 1, 2, 2, 3]);
        assert_eq!(out, vec![0, 1, 2, 2, 3]);
        assert_eq!(fan_triangles(&out), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_fan_rim_touching_apex_does_not_join_triangles() {
        let input = [0, 1, 2, 0, 3, 4];
        let out = reduce_fan(&input);
        assert_eq!(out, vec![0, 1, 2, 0, 3, 4]);
        assert_eq!(fan_triangles(&out), vec![[0, 1, 2], [0, 3, 4]]);
    }

    #[test]
    fn test_fan_apex_revisited_twice() {
        let input = [9, 1, 2, 9, 4, 5, 9, 7, 8];
        let out = reduce_fan(&input);
        assert_eq!(fan_triangles(&out), vec![[1, 2, 9], [4, 5, 9], [7, 8, 9]]);
    }

    #[test]
    fn test_fan_apex_repeated_in_rim() {
        let out = reduce_fan(&[0, 0, 1, 2]);
        assert_eq!(out, vec![0, 1, 2]);
    }

    #[test]
    fn test_fan_all_degenerate_is_empty() {
        assert!(reduce_fan(&[4, 4, 4]).is_empty());
        assert!(reduce_fan(&[]).is_empty());
    }

    #[test]
    fn test_polygon_uses_fan_convention() {
        let input = [7, 3, 3, 9, 1, 7];
        assert_eq!(
            reduce(PrimitiveType::ConvexPolygon, &input),
            reduce(PrimitiveType::TriangleFan, &input)
        );
        let out = reduce_fan(&input);
        assert_eq!(out, vec![7, 3, 9, 1]);
        assert_eq!(fan_triangles(&out), fan_triangles(&input));
    }
}
