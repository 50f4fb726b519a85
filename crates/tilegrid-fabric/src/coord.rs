//! Tile coordinates and group extents.
//!
//! A kernel launch covers a rectangular **group** of tiles anchored at the
//! pod origin. Inside a group every tile is addressed two ways:
//!
//! - by `(x, y)` coordinate, which is how the fabric wires it, and
//! - by **linear id** `y * extent_x + x` (row-major), which is how SPMD
//!   kernels partition flat buffers.
//!
//! Both views are pure arithmetic over [`GroupDims`]; nothing here touches
//! the runtime.

use std::fmt;

/// Extents of a rectangular tile group.
///
/// `x` and `y` are counts, not indices: a `4x2` group holds 8 tiles with
/// coordinates `(0..4, 0..2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupDims {
    /// Tiles in the X dimension.
    pub x: u32,
    /// Tiles in the Y dimension.
    pub y: u32,
}

impl GroupDims {
    /// Group extents of `x` by `y` tiles.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Total tiles in the group.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        (self.x as usize) * (self.y as usize)
    }

    /// Whether `coord` falls inside these extents.
    #[must_use]
    pub const fn contains(&self, coord: TileCoord) -> bool {
        coord.x < self.x && coord.y < self.y
    }

    /// All coordinates in the group, in linear-id (row-major) order.
    pub fn coords(self) -> impl Iterator<Item = TileCoord> {
        (0..self.y).flat_map(move |y| (0..self.x).map(move |x| TileCoord::new(x, y)))
    }
}

impl fmt::Display for GroupDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Position of one tile inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column, `0..dims.x`.
    pub x: u32,
    /// Row, `0..dims.y`.
    pub y: u32,
}

impl TileCoord {
    /// Coordinate `(x, y)`.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Row-major linear id within a group of `dims` extents.
    #[must_use]
    pub const fn linear_id(&self, dims: GroupDims) -> usize {
        (self.y as usize) * (dims.x as usize) + (self.x as usize)
    }

    /// Coordinate for a row-major linear id within `dims`.
    #[must_use]
    pub const fn from_linear(id: usize, dims: GroupDims) -> Self {
        Self {
            x: (id % (dims.x as usize)) as u32,
            y: (id / (dims.x as usize)) as u32,
        }
    }

    /// Whether this is the group origin `(0, 0)`.
    ///
    /// The origin tile conventionally handles one-per-group work such as
    /// publishing a reduction result.
    #[must_use]
    pub const fn is_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_id_is_row_major() {
        let dims = GroupDims::new(4, 2);
        assert_eq!(TileCoord::new(0, 0).linear_id(dims), 0);
        assert_eq!(TileCoord::new(3, 0).linear_id(dims), 3);
        assert_eq!(TileCoord::new(0, 1).linear_id(dims), 4);
        assert_eq!(TileCoord::new(3, 1).linear_id(dims), 7);
    }

    #[test]
    fn from_linear_inverts_linear_id() {
        let dims = GroupDims::new(16, 8);
        for id in 0..dims.tile_count() {
            let coord = TileCoord::from_linear(id, dims);
            assert!(dims.contains(coord));
            assert_eq!(coord.linear_id(dims), id);
        }
    }

    #[test]
    fn coords_iterate_in_linear_order() {
        let dims = GroupDims::new(3, 2);
        let ids: Vec<usize> = dims.coords().map(|c| c.linear_id(dims)).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn contains_rejects_out_of_range() {
        let dims = GroupDims::new(4, 2);
        assert!(dims.contains(TileCoord::new(3, 1)));
        assert!(!dims.contains(TileCoord::new(4, 0)));
        assert!(!dims.contains(TileCoord::new(0, 2)));
    }

    #[test]
    fn origin_is_only_zero_zero() {
        assert!(TileCoord::new(0, 0).is_origin());
        assert!(!TileCoord::new(1, 0).is_origin());
        assert!(!TileCoord::new(0, 1).is_origin());
    }

    #[test]
    fn display_formats() {
        assert_eq!(GroupDims::new(16, 8).to_string(), "16x8");
        assert_eq!(TileCoord::new(3, 1).to_string(), "(3,1)");
    }
}
