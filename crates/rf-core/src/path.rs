//! # Materialized post paths
//!
//! A post's path is the sequence of ancestor ids ending in its own id.
//! Comparing two paths element by element yields the pre-order relation
//! between the posts, with a shorter prefix sorting before any of its
//! extensions (a node is visited immediately before its descendants).
//!
//! The store keeps the path as a single sort key: each id rendered as a
//! fixed-width zero-padded hex segment and the segments concatenated. With
//! every segment the same width, plain string comparison of keys is exactly
//! the element-wise path comparison above, so `ORDER BY path` in SQL walks
//! the tree in pre-order without touching parent pointers.

/// Hex digits per id segment. 16 digits cover the full `i64` range.
pub const SEGMENT_WIDTH: usize = 16;

/// Computes the path of a new post from its parent's path.
///
/// Pure function; the caller must supply `new_id` only after the id is
/// durably reserved, otherwise two posts could end up with colliding paths.
pub fn assign(parent_path: Option<&[i64]>, new_id: i64) -> Vec<i64> {
    match parent_path {
        Some(parent) => {
            let mut path = Vec::with_capacity(parent.len() + 1);
            path.extend_from_slice(parent);
            path.push(new_id);
            path
        }
        None => vec![new_id],
    }
}

/// Renders one id as a fixed-width key segment.
pub fn segment(id: i64) -> String {
    format!("{:0width$x}", id, width = SEGMENT_WIDTH)
}

/// Renders a whole path as its sort key.
pub fn encode(path: &[i64]) -> String {
    let mut key = String::with_capacity(path.len() * SEGMENT_WIDTH);
    for id in path {
        key.push_str(&segment(*id));
    }
    key
}

/// Recovers the id sequence from a stored sort key.
///
/// Keys are only ever produced by [`encode`]; a malformed key means the
/// stored row is corrupt, so decoding is infallible over valid input and
/// simply skips unparseable segments (which cannot occur in practice).
pub fn decode(key: &str) -> Vec<i64> {
    key.as_bytes()
        .chunks(SEGMENT_WIDTH)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .filter_map(|seg| i64::from_str_radix(seg, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_own_id() {
        assert_eq!(assign(None, 7), vec![7]);
    }

    #[test]
    fn child_path_extends_parent() {
        let parent = assign(None, 1);
        let child = assign(Some(&parent), 4);
        let grandchild = assign(Some(&child), 9);
        assert_eq!(grandchild, vec![1, 4, 9]);
        // depth + 1 == path length
        assert_eq!(grandchild.len(), 3);
    }

    #[test]
    fn key_roundtrip() {
        let path = vec![1, 42, i64::MAX];
        assert_eq!(decode(&encode(&path)), path);
    }

    #[test]
    fn key_order_is_preorder() {
        // Parent sorts before its own subtree, subtree before the next sibling.
        let root = encode(&[1]);
        let child = encode(&[1, 2]);
        let deep = encode(&[1, 2, 5]);
        let sibling = encode(&[3]);
        assert!(root < child);
        assert!(child < deep);
        assert!(deep < sibling);
    }

    #[test]
    fn key_order_matches_numeric_ids() {
        // Zero padding keeps 10-vs-9 style comparisons numeric.
        assert!(encode(&[9]) < encode(&[10]));
        assert!(encode(&[1, 9]) < encode(&[1, 10]));
    }
}
