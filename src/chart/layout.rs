//! Circle-packing layout.
//!
//! The renderer only needs each node's position, radius and depth, so the
//! layout sits behind [`LayoutEngine`]. [`PackLayout`] is the default engine:
//!
//! ```text
//! leaves:   r = sqrt(value)
//! pass 1:   pack siblings bottom-up without padding (measures the root)
//! pass 2:   pack again with padding scaled to the pass-1 root radius
//! pass 3:   scale top-down so the root fits the canvas, centred
//! ```
//!
//! Siblings are packed with a front-chain: each circle is placed tangent to
//! two circles on the chain, then the chain is repaired around any overlap.

use super::dataset::HierarchyInput;
use super::node::{HierarchyNode, NodeKind};
use smallvec::SmallVec;

/// Tolerance for tangent circles being reported as intersecting.
const EPSILON: f64 = 1e-6;

/// Canvas available to the layout, margins already removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub width: f64,
    pub height: f64,
    /// Gap between sibling circles.
    pub padding: f64,
}

/// Computes node geometry from a hierarchy.
///
/// Nodes come back in pre-order (parents before children).
pub trait LayoutEngine: Sync {
    fn layout(&self, root: &HierarchyInput, settings: &LayoutSettings) -> Vec<HierarchyNode>;
}

/// Front-chain circle packing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackLayout;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Circle {
    x: f64,
    y: f64,
    r: f64,
}

struct Cell<'a> {
    input: &'a HierarchyInput,
    depth: usize,
    parent: Option<usize>,
    /// Sorted by value, largest first.
    children: SmallVec<[usize; 8]>,
    value: f64,
    circle: Circle,
}

impl LayoutEngine for PackLayout {
    fn layout(&self, root: &HierarchyInput, settings: &LayoutSettings) -> Vec<HierarchyNode> {
        let mut cells = Vec::with_capacity(root.node_count());
        collect(root, 0, None, &mut cells);

        // Pre-order reversed visits children before parents
        for i in (0..cells.len()).rev() {
            let sum: f64 = cells[i].children.iter().map(|&c| cells[c].value).sum();
            cells[i].value = cells[i].input.own_value() + sum;
        }
        for i in 0..cells.len() {
            let mut children = std::mem::take(&mut cells[i].children);
            children.sort_by(|&a, &b| cells[b].value.total_cmp(&cells[a].value));
            cells[i].children = children;
        }

        for cell in cells.iter_mut().filter(|c| c.children.is_empty()) {
            cell.circle.r = cell.value.sqrt();
        }

        let extent = settings.width.min(settings.height).max(0.0);
        pack_children(&mut cells, 0.0);
        let measured = cells[0].circle.r;
        if measured > 0.0 && extent > 0.0 {
            pack_children(&mut cells, settings.padding * measured / extent);
        }

        let root_r = cells[0].circle.r;
        let k = if root_r > 0.0 { extent / (2.0 * root_r) } else { 0.0 };
        cells[0].circle.x = settings.width / 2.0;
        cells[0].circle.y = settings.height / 2.0;
        for i in 0..cells.len() {
            cells[i].circle.r *= k;
            if let Some(parent) = cells[i].parent {
                let origin = cells[parent].circle;
                cells[i].circle.x = origin.x + k * cells[i].circle.x;
                cells[i].circle.y = origin.y + k * cells[i].circle.y;
            }
        }

        cells
            .iter()
            .map(|cell| HierarchyNode {
                id: cell.input.name.clone(),
                label: cell.input.name.clone(),
                depth: cell.depth,
                x: cell.circle.x,
                y: cell.circle.y,
                r: cell.circle.r,
                kind: NodeKind::classify(cell.depth, cell.input),
            })
            .collect()
    }
}

/// Flatten the hierarchy in pre-order, returning the index of `input`.
fn collect<'a>(
    input: &'a HierarchyInput,
    depth: usize,
    parent: Option<usize>,
    cells: &mut Vec<Cell<'a>>,
) -> usize {
    let index = cells.len();
    cells.push(Cell {
        input,
        depth,
        parent,
        children: SmallVec::new(),
        value: 0.0,
        circle: Circle::default(),
    });
    for child in &input.children {
        let child_index = collect(child, depth + 1, Some(index), cells);
        cells[index].children.push(child_index);
    }
    index
}

/// Pack every parent's children bottom-up; parents take the enclosing radius.
fn pack_children(cells: &mut [Cell<'_>], padding: f64) {
    let mut circles: Vec<Circle> = Vec::new();
    for i in (0..cells.len()).rev() {
        if cells[i].children.is_empty() {
            continue;
        }
        circles.clear();
        circles.extend(cells[i].children.iter().map(|&c| {
            let circle = cells[c].circle;
            Circle {
                r: circle.r + padding,
                ..circle
            }
        }));

        let enclosing = pack_siblings(&mut circles);

        for (&c, circle) in cells[i].children.clone().iter().zip(&circles) {
            cells[c].circle = Circle {
                x: circle.x,
                y: circle.y,
                r: circle.r - padding,
            };
        }
        cells[i].circle.r = enclosing + padding;
    }
}

/// Pack circles around the origin; returns the enclosing radius.
fn pack_siblings(circles: &mut [Circle]) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }

    let (first, second) = (circles[0], circles[1]);
    place(second, first, &mut circles[2]);

    // Front-chain as a circular doubly linked list over circle indices
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    (next[0], next[1], next[2]) = (1, 2, 0);
    (prev[0], prev[1], prev[2]) = (2, 0, 1);

    let (mut a, mut b) = (0usize, 1usize);
    let mut i = 3;
    'pack: while i < n {
        let (ca, cb) = (circles[a], circles[b]);
        place(ca, cb, &mut circles[i]);
        let c = circles[i];

        // Closest intersecting circle on the chain, searching both ways
        let (mut j, mut k) = (next[b], prev[a]);
        let (mut sj, mut sk) = (circles[b].r, circles[a].r);
        loop {
            if sj <= sk {
                if intersects(circles[j], c) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(circles[k], c) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        // Insert between a and b
        prev[i] = a;
        next[i] = b;
        next[a] = i;
        prev[b] = i;
        b = i;

        // Restart from the pair closest to the centroid
        let mut best = score(circles[a], circles[next[a]]);
        let mut node = next[b];
        while node != b {
            let s = score(circles[node], circles[next[node]]);
            if s < best {
                a = node;
                best = s;
            }
            node = next[node];
        }
        b = next[a];
        i += 1;
    }

    let mut chain = vec![b];
    let mut node = next[b];
    while node != b {
        chain.push(node);
        node = next[node];
    }
    let placed: &[Circle] = circles;
    let hull = enclose(chain.iter().map(|&idx| placed[idx]));

    for circle in circles.iter_mut() {
        circle.x -= hull.x;
        circle.y -= hull.y;
    }
    hull.r
}

/// Place `c` tangent to both `a` and `b`.
fn place(b: Circle, a: Circle, c: &mut Circle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 > 0.0 {
        let a2 = (a.r + c.r).powi(2);
        let b2 = (b.r + c.r).powi(2);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.r + b.r - EPSILON;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of `a` and `b`.
fn score(a: Circle, b: Circle) -> f64 {
    let ab = a.r + b.r;
    if ab <= 0.0 {
        return a.x * a.x + a.y * a.y;
    }
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

/// Circle around the bounding-box centre that contains every circle.
///
/// Not always the smallest enclosing circle, but never smaller.
fn enclose(circles: impl Iterator<Item = Circle> + Clone) -> Circle {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for c in circles.clone() {
        min_x = min_x.min(c.x - c.r);
        min_y = min_y.min(c.y - c.r);
        max_x = max_x.max(c.x + c.r);
        max_y = max_y.max(c.y + c.r);
    }
    if !min_x.is_finite() {
        return Circle::default();
    }

    let x = (min_x + max_x) / 2.0;
    let y = (min_y + max_y) / 2.0;
    let r = circles
        .map(|c| ((c.x - x).powi(2) + (c.y - y).powi(2)).sqrt() + c.r)
        .fold(0.0, f64::max);
    Circle { x, y, r }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: LayoutSettings = LayoutSettings {
        width: 400.0,
        height: 400.0,
        padding: 5.0,
    };

    fn leaf(name: &str, awareness: f64) -> HierarchyInput {
        HierarchyInput {
            name: name.into(),
            section_id: Some("layout".into()),
            usage: Some(awareness / 2.0),
            awareness: Some(awareness),
            ..Default::default()
        }
    }

    fn tree() -> HierarchyInput {
        HierarchyInput {
            name: "features".into(),
            children: vec![
                HierarchyInput {
                    name: "layout".into(),
                    is_section: true,
                    children: vec![leaf("grid", 90.0), leaf("flexbox", 120.0), leaf("subgrid", 20.0)],
                    ..Default::default()
                },
                HierarchyInput {
                    name: "typography".into(),
                    is_section: true,
                    children: vec![leaf("font_display", 40.0), leaf("line_clamp", 60.0)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn distance(a: &HierarchyNode, b: &HierarchyNode) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn test_pack_siblings_no_overlap() {
        let mut circles: Vec<Circle> = [10.0, 7.0, 7.0, 5.0, 4.0, 3.0, 3.0, 2.0, 1.0]
            .iter()
            .map(|&r| Circle { x: 0.0, y: 0.0, r })
            .collect();
        let enclosing = pack_siblings(&mut circles);

        for (i, a) in circles.iter().enumerate() {
            for b in &circles[i + 1..] {
                let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                assert!(d + 1e-6 >= a.r + b.r, "{a:?} overlaps {b:?}");
            }
            let reach = (a.x * a.x + a.y * a.y).sqrt() + a.r;
            assert!(reach <= enclosing + 1e-6);
        }
    }

    #[test]
    fn test_pack_siblings_small_counts() {
        assert_eq!(pack_siblings(&mut []), 0.0);

        let mut one = [Circle { x: 3.0, y: 3.0, r: 4.0 }];
        assert_eq!(pack_siblings(&mut one), 4.0);
        assert_eq!((one[0].x, one[0].y), (0.0, 0.0));

        let mut two = [Circle { x: 0.0, y: 0.0, r: 2.0 }, Circle { x: 0.0, y: 0.0, r: 3.0 }];
        assert_eq!(pack_siblings(&mut two), 5.0);
        assert_eq!(two[1].x - two[0].x, 5.0);
    }

    #[test]
    fn test_layout_preorder_and_kinds() {
        let nodes = PackLayout.layout(&tree(), &SETTINGS);

        let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            ["features", "layout", "grid", "flexbox", "subgrid", "typography", "font_display", "line_clamp"]
        );
        assert_eq!(nodes[0].kind, NodeKind::Root);
        assert!(matches!(nodes[1].kind, NodeKind::Section { .. }));
        assert!(nodes[2].is_leaf());
        assert_eq!(nodes[2].depth, 2);
        assert_eq!(nodes[2].label, "grid");
    }

    #[test]
    fn test_layout_fits_canvas() {
        let nodes = PackLayout.layout(&tree(), &SETTINGS);
        let root = &nodes[0];

        assert_eq!((root.x, root.y), (200.0, 200.0));
        assert!((root.r - 200.0).abs() < 1e-9);
        for node in &nodes {
            assert!(node.r >= 0.0);
            assert!(distance(node, root) + node.r <= root.r + 1e-6, "{} escapes", node.id);
        }
    }

    #[test]
    fn test_layout_children_inside_parent_and_padded() {
        let nodes = PackLayout.layout(&tree(), &SETTINGS);
        let layout = &nodes[1];
        let leaves = &nodes[2..5];

        for leaf in leaves {
            assert!(distance(leaf, layout) + leaf.r <= layout.r + 1e-6);
        }
        for (i, a) in leaves.iter().enumerate() {
            for b in &leaves[i + 1..] {
                assert!(distance(a, b) + 1e-6 >= a.r + b.r, "{} touches {}", a.id, b.id);
            }
        }
        // Larger awareness, larger bubble
        assert!(nodes[3].r > nodes[2].r && nodes[2].r > nodes[4].r);
    }

    #[test]
    fn test_layout_sibling_gap_matches_padding() {
        let nodes = PackLayout.layout(&tree(), &SETTINGS);

        for siblings in [&nodes[2..5], &nodes[6..8]] {
            let mut min_gap = f64::INFINITY;
            for (i, a) in siblings.iter().enumerate() {
                for b in &siblings[i + 1..] {
                    min_gap = min_gap.min(distance(a, b) - a.r - b.r);
                }
            }
            assert!(
                (min_gap - SETTINGS.padding).abs() < 1.0,
                "gap {min_gap} between {} siblings",
                siblings[0].id
            );
        }
    }

    #[test]
    fn test_layout_zero_values_do_not_produce_nan() {
        let root = HierarchyInput {
            name: "features".into(),
            children: vec![leaf("a", 0.0), leaf("b", 0.0)],
            ..Default::default()
        };
        let nodes = PackLayout.layout(&root, &SETTINGS);

        for node in &nodes {
            assert!(node.x.is_finite() && node.y.is_finite() && node.r.is_finite());
            assert_eq!(node.r, 0.0);
        }
    }

    #[test]
    fn test_place_tangent() {
        let a = Circle { x: 0.0, y: 0.0, r: 2.0 };
        let b = Circle { x: 5.0, y: 0.0, r: 3.0 };
        let mut c = Circle { x: 0.0, y: 0.0, r: 1.0 };
        place(b, a, &mut c);

        let da = ((c.x - a.x).powi(2) + (c.y - a.y).powi(2)).sqrt();
        let db = ((c.x - b.x).powi(2) + (c.y - b.y).powi(2)).sqrt();
        assert!((da - 3.0).abs() < 1e-9);
        assert!((db - 4.0).abs() < 1e-9);
    }
}
