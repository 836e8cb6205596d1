//! Table structure queries.
//!
//! Read-only helpers for table toolbars: header detection, border and merge
//! state of cells, and header toggles. Toggles never mutate the table; they
//! return [`CellEdit`] values for the host editor to apply.

use crate::node::{Border, Node, Table, TableCell, TableRow};

/// Cell element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// `th`
    Header,
    /// `td`
    Data,
}

impl CellKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CellKind::Header => "th",
            CellKind::Data => "td",
        }
    }
}

/// Header flag carried by a `th` cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFlag {
    /// `table_header_row`
    Row,
    /// `table_header_cell`
    Column,
}

/// A change to one cell: set its kind and set or clear one header flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    /// Path of the cell, starting with the table's path
    pub path: Vec<usize>,
    pub kind: CellKind,
    pub flag: HeaderFlag,
    /// `true` sets the flag, `false` removes it
    pub value: bool,
}

/// Which borders a cell shows, as rendered by the borders menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderState {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    /// No side has a border
    pub none: bool,
    /// Every side has a border
    pub outer: bool,
}

/// Merge actions available for a cell selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeState {
    pub can_merge: bool,
    pub can_unmerge: bool,
}

/// Row nodes with their index among the table's children
fn indexed_rows(table: &Table) -> impl Iterator<Item = (usize, &TableRow)> {
    table
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| match child {
            Node::TableRow(row) => Some((index, row)),
            _ => None,
        })
}

/// Cell nodes with their index among the row's children
fn indexed_cells(row: &TableRow) -> impl Iterator<Item = (usize, &TableCell)> {
    row.children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| match child {
            Node::TableCell(cell) => Some((index, cell)),
            _ => None,
        })
}

/// Whether the first row holds a cell marked as header row
pub fn has_header_row(table: &Table) -> bool {
    indexed_rows(table)
        .next()
        .is_some_and(|(_, row)| indexed_cells(row).any(|(_, cell)| cell.header && cell.header_row))
}

/// Whether any row starts with a cell marked as header column
pub fn has_header_column(table: &Table) -> bool {
    indexed_rows(table).any(|(_, row)| {
        indexed_cells(row)
            .next()
            .is_some_and(|(_, cell)| cell.header && cell.header_cell)
    })
}

/// Edits turning the first row into a header row, or back.
///
/// Turning on converts every `td` of the first row. Turning off converts only
/// the `th` cells that are not also part of the header column.
pub fn header_row_edits(table: &Table, table_path: &[usize], on: bool) -> Vec<CellEdit> {
    let Some((row_index, row)) = indexed_rows(table).next() else {
        return Vec::new();
    };

    indexed_cells(row)
        .filter(|(_, cell)| header_edit_applies(cell, on, cell.header_cell))
        .map(|(cell_index, _)| CellEdit {
            path: cell_path(table_path, row_index, cell_index),
            kind: if on { CellKind::Header } else { CellKind::Data },
            flag: HeaderFlag::Row,
            value: on,
        })
        .collect()
}

/// Edits turning the first column into a header column, or back.
///
/// Same matching as [`header_row_edits`], with the header row as the flag
/// that keeps a cell a `th`.
pub fn header_column_edits(table: &Table, table_path: &[usize], on: bool) -> Vec<CellEdit> {
    indexed_rows(table)
        .filter_map(|(row_index, row)| {
            indexed_cells(row)
                .next()
                .map(|(cell_index, cell)| (row_index, cell_index, cell))
        })
        .filter(|(_, _, cell)| header_edit_applies(cell, on, cell.header_row))
        .map(|(row_index, cell_index, _)| CellEdit {
            path: cell_path(table_path, row_index, cell_index),
            kind: if on { CellKind::Header } else { CellKind::Data },
            flag: HeaderFlag::Column,
            value: on,
        })
        .collect()
}

fn header_edit_applies(cell: &TableCell, on: bool, held_by_other: bool) -> bool {
    if on {
        !cell.header
    } else {
        cell.header && !held_by_other
    }
}

fn cell_path(table_path: &[usize], row: usize, cell: usize) -> Vec<usize> {
    let mut path = Vec::with_capacity(table_path.len() + 2);
    path.extend_from_slice(table_path);
    path.push(row);
    path.push(cell);
    path
}

/// A side shows a border unless its size is 0; an unset side uses the 1px default
fn side_visible(border: Option<&Border>) -> bool {
    border.and_then(|b| b.size).map_or(true, |size| size > 0.0)
}

/// Border state of a cell
pub fn border_state(cell: &TableCell) -> BorderState {
    let borders = &cell.borders;
    let top = side_visible(borders.top.as_ref());
    let bottom = side_visible(borders.bottom.as_ref());
    let left = side_visible(borders.left.as_ref());
    let right = side_visible(borders.right.as_ref());

    BorderState {
        top,
        bottom,
        left,
        right,
        none: !top && !bottom && !left && !right,
        outer: top && bottom && left && right,
    }
}

/// Merge state of the selected cells
pub fn merge_state(selected: &[&TableCell]) -> MergeState {
    match selected {
        [] => MergeState::default(),
        [cell] => MergeState {
            can_merge: false,
            can_unmerge: cell.col_span() > 1 || cell.row_span() > 1,
        },
        _ => MergeState {
            can_merge: true,
            can_unmerge: false,
        },
    }
}
