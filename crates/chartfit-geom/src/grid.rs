//! Small-multiples grid packing.
//!
//! This is a fixed lookup policy, not an optimizer:
//!
//! | items  | rows |
//! |--------|------|
//! | 1..=3  | 1    |
//! | 4      | 2 (2×2) |
//! | 5..=8  | 2    |
//! | 9..=12 | 3    |
//! | 13..   | 4    |
//!
//! `cols = ceil(n / rows)`; every row but the last is full and the last row holds the remainder.
//! Short rows are centred horizontally.

use crate::error::{Result, positive_dimension};
use crate::model::{Rect, WeightedItem, validated_in_order};
use crate::partition::{PartitionSegment, SegmentGeometry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPacking {
    pub rows: usize,
    pub cols: usize,
    pub items_per_row: Vec<usize>,
}

fn rows_for(n: usize) -> usize {
    match n {
        0 => 0,
        1..=3 => 1,
        4..=8 => 2,
        9..=12 => 3,
        _ => 4,
    }
}

/// Packs `n` cells into rows and columns using the fixed policy above.
pub fn pack(n: usize) -> GridPacking {
    let rows = rows_for(n);
    if rows == 0 {
        return GridPacking {
            rows: 0,
            cols: 0,
            items_per_row: Vec::new(),
        };
    }
    let cols = n.div_ceil(rows);
    let mut items_per_row = vec![cols; rows];
    items_per_row[rows - 1] = n - cols * (rows - 1);
    GridPacking {
        rows,
        cols,
        items_per_row,
    }
}

impl GridPacking {
    pub fn len(&self) -> usize {
        self.items_per_row.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Horizontal offset that centres `row` when it holds fewer than `cols` items.
    pub fn row_offset(&self, row: usize, cell_width: f64) -> f64 {
        let in_row = self.items_per_row.get(row).copied().unwrap_or(0);
        self.cols.saturating_sub(in_row) as f64 * cell_width / 2.0
    }

    /// One cell rectangle per item, row-major, tiling `area` with short rows centred.
    pub fn cells(&self, area: Rect) -> Vec<Rect> {
        if self.is_empty() {
            return Vec::new();
        }
        let cell_width = area.width / self.cols as f64;
        let cell_height = area.height / self.rows as f64;

        let mut out: Vec<Rect> = Vec::with_capacity(self.len());
        for (row, &in_row) in self.items_per_row.iter().enumerate() {
            let offset = self.row_offset(row, cell_width);
            let y = area.y + row as f64 * cell_height;
            for col in 0..in_row {
                let x = area.x + offset + col as f64 * cell_width;
                out.push(Rect::new(x, y, cell_width, cell_height));
            }
        }
        out
    }
}

/// Lays items out as grid cells over `area`, in item order.
///
/// Zero-weight items still get a cell (so positions stay stable) but are flagged `zero_area`.
pub fn partition_grid(items: &[WeightedItem], area: Rect) -> Result<Vec<PartitionSegment>> {
    positive_dimension("width", area.width)?;
    positive_dimension("height", area.height)?;
    let ordered = validated_in_order(items)?;

    let cells = pack(ordered.len()).cells(area);
    Ok(ordered
        .into_iter()
        .zip(cells)
        .map(|(item, cell)| {
            PartitionSegment::new(item, SegmentGeometry::Cell(cell), item.weight == 0.0)
        })
        .collect())
}
