//! Arena-based quadtree for repulsion approximation and proximity queries.
//!
//! Cells are stored contiguously in a `Vec` and reference each other by
//! index, which keeps a per-tick rebuild cheap. The tree borrows the item
//! slice rather than copying it and only stores indices into it.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::Point2;
//! use spacechart::quadtree::{BoundingBox, QuadTree};
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(50.0, 50.0),
//! ];
//!
//! let bounds = BoundingBox::new_from_items(&points);
//! let tree = QuadTree::build(&points, bounds);
//!
//! let mut near = tree.neighbors_within(Point2::new(0.0, 0.0), 2.0);
//! near.sort();
//! assert_eq!(near, vec![0, 1]);
//! ```

use crate::forces::jiggle;
use nalgebra::{Point2, Vector2};

/// Anything with a 2D position can be indexed by the tree
pub trait Located {
    fn position(&self) -> Point2<f64>;
}

impl Located for Point2<f64> {
    fn position(&self) -> Point2<f64> {
        *self
    }
}

/// A rectangular bounding box in layout coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl BoundingBox {
    /// Smallest box containing every item
    pub fn new_from_items<B: Located>(items: &[B]) -> Self {
        items.iter().fold(
            Self {
                min: Point2::new(f64::INFINITY, f64::INFINITY),
                max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            },
            |bounds, item| {
                let pos = item.position();
                Self {
                    min: Point2::new(bounds.min.x.min(pos.x), bounds.min.y.min(pos.y)),
                    max: Point2::new(bounds.max.x.max(pos.x), bounds.max.y.max(pos.y)),
                }
            },
        )
    }

    fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Quadrant (0-3) of a point within this box.
    ///
    /// ```text
    /// +-------+-------+
    /// |   2   |   3   |
    /// +-------+-------+
    /// |   0   |   1   |
    /// +-------+-------+
    /// ```
    fn quadrant(&self, point: &Point2<f64>) -> usize {
        let center = self.center();
        let x_bit = (point.x > center.x) as usize;
        let y_bit = (point.y > center.y) as usize;
        x_bit | (y_bit << 1)
    }

    fn subdivide(&self, quadrant: usize) -> Self {
        let center = self.center();
        let (min_x, max_x) = if quadrant & 1 != 0 {
            (center.x, self.max.x)
        } else {
            (self.min.x, center.x)
        };
        let (min_y, max_y) = if quadrant & 2 != 0 {
            (center.y, self.max.y)
        } else {
            (self.min.y, center.y)
        };
        BoundingBox {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }
}

/// Index into the cell arena
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellId(u32);

impl CellId {
    pub const EMPTY: CellId = CellId(u32::MAX);

    fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "CellId overflow");
        CellId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

#[derive(Clone, Copy, Debug)]
enum Cell {
    Leaf {
        item: u32,
    },
    /// Items that could not be separated before the depth limit
    /// (coincident or nearly coincident positions)
    Bucket {
        start: u32,
        count: u32,
    },
    Internal {
        centroid: Point2<f64>,
        count: u32,
        bounds: BoundingBox,
        children: [CellId; 4],
    },
}

/// Quadtree over a borrowed slice of located items
pub struct QuadTree<'a, B: Located> {
    cells: Vec<Cell>,
    /// Item indices referenced by bucket cells
    bucketed: Vec<u32>,
    items: &'a [B],
    pub(crate) root: CellId,
}

impl<'a, B: Located> QuadTree<'a, B> {
    pub fn build(items: &'a [B], bounds: BoundingBox) -> Self {
        let mut cells = Vec::with_capacity(items.len() * 2);
        let mut bucketed = Vec::new();
        let indices: Vec<usize> = (0..items.len()).collect();

        let root = Self::build_recursive(items, &indices, bounds, 0, &mut cells, &mut bucketed);

        QuadTree {
            cells,
            bucketed,
            items,
            root,
        }
    }

    fn build_recursive(
        items: &[B],
        indices: &[usize],
        bounds: BoundingBox,
        depth: usize,
        cells: &mut Vec<Cell>,
        bucketed: &mut Vec<u32>,
    ) -> CellId {
        const MAX_DEPTH: usize = 24;

        match indices {
            [] => CellId::EMPTY,

            [single] => {
                let id = CellId::new(cells.len());
                cells.push(Cell::Leaf {
                    item: *single as u32,
                });
                id
            }

            _ if depth >= MAX_DEPTH => {
                let start = bucketed.len() as u32;
                bucketed.extend(indices.iter().map(|&i| i as u32));
                let id = CellId::new(cells.len());
                cells.push(Cell::Bucket {
                    start,
                    count: indices.len() as u32,
                });
                id
            }

            indices => {
                let mut quadrants: [Vec<usize>; 4] = Default::default();
                for &i in indices {
                    let q = bounds.quadrant(&items[i].position());
                    quadrants[q].push(i);
                }

                let children: [CellId; 4] = std::array::from_fn(|q| {
                    Self::build_recursive(
                        items,
                        &quadrants[q],
                        bounds.subdivide(q),
                        depth + 1,
                        cells,
                        bucketed,
                    )
                });

                let sum = indices
                    .iter()
                    .fold(Vector2::zeros(), |acc, &i| acc + items[i].position().coords);
                let centroid = Point2::from(sum / indices.len() as f64);

                let id = CellId::new(cells.len());
                cells.push(Cell::Internal {
                    centroid,
                    count: indices.len() as u32,
                    bounds,
                    children,
                });
                id
            }
        }
    }

    /// Velocity contribution of every item on item `target`, approximating
    /// distant cells by their centroid (Barnes-Hut with opening angle θ)
    ///
    /// `strength` is the per-item coefficient (negative repels) and
    /// `distance_min2` softens very close pairs.
    pub fn repulsion(
        &self,
        target: usize,
        theta: f64,
        strength: f64,
        distance_min2: f64,
    ) -> Vector2<f64> {
        let pos = self.items[target].position();
        self.repulsion_recursive(self.root, target, pos, theta, strength, distance_min2)
    }

    fn repulsion_recursive(
        &self,
        cell_id: CellId,
        target: usize,
        pos: Point2<f64>,
        theta: f64,
        strength: f64,
        distance_min2: f64,
    ) -> Vector2<f64> {
        if cell_id.is_empty() {
            return Vector2::zeros();
        }

        match &self.cells[cell_id.index()] {
            Cell::Leaf { item } => {
                self.item_repulsion(*item as usize, target, pos, strength, distance_min2)
            }

            Cell::Bucket { start, count } => self.bucketed
                [*start as usize..(*start + *count) as usize]
                .iter()
                .map(|&i| self.item_repulsion(i as usize, target, pos, strength, distance_min2))
                .fold(Vector2::zeros(), |a, b| a + b),

            Cell::Internal {
                centroid,
                count,
                bounds,
                children,
            } => {
                let diff = *centroid - pos;
                let distance = diff.magnitude();
                let size = (bounds.max - bounds.min).magnitude();

                if !bounds.contains(&pos) && distance > 0.0 && size / distance < theta {
                    pair_push(diff, strength * *count as f64, distance_min2)
                } else {
                    children
                        .iter()
                        .map(|&child| {
                            self.repulsion_recursive(
                                child,
                                target,
                                pos,
                                theta,
                                strength,
                                distance_min2,
                            )
                        })
                        .fold(Vector2::zeros(), |a, b| a + b)
                }
            }
        }
    }

    fn item_repulsion(
        &self,
        item: usize,
        target: usize,
        pos: Point2<f64>,
        strength: f64,
        distance_min2: f64,
    ) -> Vector2<f64> {
        if item == target {
            return Vector2::zeros();
        }
        let mut diff = self.items[item].position() - pos;
        if diff.x == 0.0 && diff.y == 0.0 {
            diff = jiggle(target, item);
        }
        pair_push(diff, strength, distance_min2)
    }

    /// Indices of all items within `radius` of `pos` (inclusive)
    pub fn neighbors_within(&self, pos: Point2<f64>, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        self.neighbors_recursive(self.root, pos, radius, &mut result);
        result
    }

    fn neighbors_recursive(
        &self,
        cell_id: CellId,
        pos: Point2<f64>,
        radius: f64,
        result: &mut Vec<usize>,
    ) {
        if cell_id.is_empty() {
            return;
        }

        let radius_sq = radius * radius;
        match &self.cells[cell_id.index()] {
            Cell::Leaf { item } => {
                let i = *item as usize;
                if (self.items[i].position() - pos).magnitude_squared() <= radius_sq {
                    result.push(i);
                }
            }

            Cell::Bucket { start, count } => {
                for &i in &self.bucketed[*start as usize..(*start + *count) as usize] {
                    let i = i as usize;
                    if (self.items[i].position() - pos).magnitude_squared() <= radius_sq {
                        result.push(i);
                    }
                }
            }

            Cell::Internal {
                bounds, children, ..
            } => {
                if box_intersects_circle(bounds, pos, radius) {
                    for &child in children {
                        self.neighbors_recursive(child, pos, radius, result);
                    }
                }
            }
        }
    }

    /// Number of cells in the arena (for diagnostics)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Velocity change from a source at offset `diff`: `diff · strength / l`,
/// where `l` is the squared distance, softened below `distance_min2`
#[inline]
pub(crate) fn pair_push(diff: Vector2<f64>, strength: f64, distance_min2: f64) -> Vector2<f64> {
    let mut l = diff.magnitude_squared();
    if l < distance_min2 {
        l = (distance_min2 * l).sqrt();
    }
    diff * (strength / l)
}

fn box_intersects_circle(bounds: &BoundingBox, center: Point2<f64>, radius: f64) -> bool {
    let closest_x = center.x.clamp(bounds.min.x, bounds.max.x);
    let closest_y = center.y.clamp(bounds.min.y, bounds.max.y);

    let dx = center.x - closest_x;
    let dy = center.y - closest_y;

    dx * dx + dy * dy <= radius * radius
}
