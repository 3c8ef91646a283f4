//! Visible region of the sheet.
//!
//! The presentation layer owns scrolling; it tells the viewport which
//! rectangle is on screen and asks it which references fall inside. Row 0 and
//! column 0 are the header band and never hold cells.

use sheetcalc_engine::engine::{CellRef, ColumnLabeler};

/// Inclusive rectangle of columns and rows (1-based; 0 is the header band).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub start_col: usize,
    pub end_col: usize,
    pub start_row: usize,
    pub end_row: usize,
}

impl Region {
    pub fn new(start_col: usize, end_col: usize, start_row: usize, end_row: usize) -> Self {
        Region {
            start_col,
            end_col,
            start_row,
            end_row,
        }
    }

    pub fn contains(&self, col: usize, row: usize) -> bool {
        (self.start_col..=self.end_col).contains(&col)
            && (self.start_row..=self.end_row).contains(&row)
    }
}

#[derive(Debug, Default)]
pub struct Viewport {
    region: Region,
    /// Visible references for the region they were computed for.
    visible: Option<(Region, Vec<CellRef>)>,
    labels: ColumnLabeler,
}

impl Viewport {
    pub fn new(region: Region) -> Self {
        Viewport {
            region,
            ..Self::default()
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Whether `reference` is a cell inside the current region.
    pub fn contains(&self, reference: &CellRef) -> bool {
        match (reference.column(), reference.row()) {
            (Some(col), Some(row)) => col != 0 && row != 0 && self.region.contains(col, row),
            _ => false,
        }
    }

    /// Every cell reference in the current region, row by row.
    ///
    /// The list is memoized for the exact region and rebuilt when it changes.
    pub fn visible_refs(&mut self) -> &[CellRef] {
        let fresh = matches!(&self.visible, Some((region, _)) if *region == self.region);
        if !fresh {
            let refs = self.build_refs();
            self.visible = Some((self.region, refs));
        }
        match &self.visible {
            Some((_, refs)) => refs.as_slice(),
            None => &[],
        }
    }

    fn build_refs(&mut self) -> Vec<CellRef> {
        let Region {
            start_col,
            end_col,
            start_row,
            end_row,
        } = self.region;
        let mut refs = Vec::new();

        for row in start_row.max(1)..=end_row {
            for col in start_col.max(1)..=end_col {
                if let Some(reference) = CellRef::from_label(self.labels.label(col), row) {
                    refs.push(reference);
                }
            }
        }

        refs
    }
}
