//! Row packing shared by section lengths, frames and the fill-last rule.
//!
//! Every distribution is a special case of greedy first-fit row packing:
//! items are placed left to right along the cross axis, separated by the
//! interitem spacing, and a row is closed when the next item would overflow
//! the cross length (or, for `EntireRow` and `Equally`, when the row is
//! full by count). Each closed row adds its extent plus the line spacing.

/// Slack allowed when testing for cross-axis overflow.
///
/// An item sized to exactly the leftover of its row must stay on that row
/// despite rounding in `used + spacing + leftover`.
const OVERFLOW_TOLERANCE: f32 = 1e-3;

/// Where a placed item landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    /// Zero-based row number.
    pub row: usize,
    /// Offset from the start of the row along the cross axis.
    pub cross_offset: f32,
    /// Offset of the row from the first row along the scroll axis.
    pub along_offset: f32,
}

/// Greedy first-fit row packer.
#[derive(Debug, Clone)]
pub(crate) struct RowPacker {
    limit: f32,
    interitem: f32,
    line: f32,
    used: f32,
    row_extent: f32,
    row_len: usize,
    rows: usize,
    total: f32,
}

impl RowPacker {
    /// Create a packer for rows `limit` long.
    pub fn new(limit: f32, interitem: f32, line: f32) -> Self {
        Self {
            limit: limit.max(0.0),
            interitem,
            line,
            used: 0.0,
            row_extent: 0.0,
            row_len: 0,
            rows: 0,
            total: 0.0,
        }
    }

    /// Cross length an item appended to the current row could take.
    ///
    /// A fresh row offers the whole limit.
    pub fn leftover(&self) -> f32 {
        if self.row_len == 0 {
            self.limit
        } else {
            (self.limit - self.used - self.interitem).max(0.0)
        }
    }

    /// Number of items on the current row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Place an item, opening a new row first if it would overflow.
    pub fn place(&mut self, cross: f32, along: f32) -> Placement {
        if self.row_len > 0 && self.used + self.interitem + cross > self.limit + OVERFLOW_TOLERANCE {
            self.end_row();
        }

        let cross_offset = if self.row_len == 0 {
            0.0
        } else {
            self.used + self.interitem
        };

        self.used = cross_offset + cross;
        self.row_extent = self.row_extent.max(along);
        self.row_len += 1;

        Placement {
            row: self.rows,
            cross_offset,
            along_offset: self.total,
        }
    }

    /// Close the current row. Does nothing on an empty row.
    pub fn end_row(&mut self) {
        if self.row_len == 0 {
            return;
        }
        self.total += self.row_extent + self.line;
        self.rows += 1;
        self.used = 0.0;
        self.row_extent = 0.0;
        self.row_len = 0;
    }

    /// Close the last row and return the total along extent of all rows.
    pub fn finish(mut self) -> f32 {
        self.end_row();
        self.total
    }
}
