use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use crate::config::validate_board_size;
use crate::error::{EngineError, EngineResult};
use crate::types::{Coord, Field, FieldBounds, Owner, Point};

/// One frame's view of the board.
///
/// Fields keep their discovery order. Lookups by coordinate go through an
/// index built once at construction; when a coordinate appears twice the
/// first field wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    size: usize,
    fields: Vec<Field>,
    index: HashMap<Coord, usize>,
}

impl BoardSnapshot {
    /// Builds the fields from the calibration corner scan.
    ///
    /// `corners` must hold `(size - 1)^2` points in scan order. Each square
    /// takes its four corners from two consecutive scan lines; the last
    /// corner of every line only closes the square before it.
    pub fn from_corners(corners: &[Point], size: usize) -> EngineResult<Self> {
        validate_board_size(size)?;

        let per_line = size - 1;
        let expected = per_line * per_line;
        if corners.len() != expected {
            return Err(EngineError::CornerCountMismatch {
                expected,
                found: corners.len(),
            });
        }

        let mut fields = Vec::with_capacity((per_line - 1) * (per_line - 1));
        for i in 0..expected - per_line {
            if (i + 1) % per_line == 0 {
                continue;
            }

            let coord = Coord::from_indexes(i / per_line, i % per_line)
                .ok_or(EngineError::BoardTooLarge { size })?;
            fields.push(Field {
                coord,
                owner: Owner::None,
                bounds: FieldBounds {
                    left_up: corners[i],
                    right_up: corners[i + 1],
                    left_down: corners[i + per_line],
                    right_down: corners[i + size],
                },
            });
        }

        debug!(size, fields = fields.len(), "built snapshot from corners");
        Ok(Self::from_fields(size, fields))
    }

    /// Wraps an already tagged field list.
    pub fn from_fields(size: usize, fields: Vec<Field>) -> Self {
        let mut index = HashMap::with_capacity(fields.len());
        for (pos, field) in fields.iter().enumerate() {
            match index.entry(field.coord) {
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
                Entry::Occupied(first) => {
                    warn!(
                        coord = %field.coord,
                        first = *first.get(),
                        duplicate = pos,
                        "duplicate field coordinate, keeping the first"
                    );
                }
            }
        }

        Self {
            size,
            fields,
            index,
        }
    }

    /// An empty `side x side` grid laid out in corner-scan order.
    pub fn blank(side: usize) -> EngineResult<Self> {
        let size = side + 2;
        validate_board_size(size)?;

        let mut fields = Vec::with_capacity(side * side);
        for column in 0..side {
            for row in 0..side {
                let coord =
                    Coord::from_indexes(column, row).ok_or(EngineError::BoardTooLarge { size })?;
                fields.push(Field::new(coord, Owner::None));
            }
        }

        Ok(Self::from_fields(size, fields))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        self.index.get(&coord).copied()
    }

    pub fn field(&self, coord: Coord) -> Option<&Field> {
        self.index_of(coord).map(|pos| &self.fields[pos])
    }

    pub fn owner(&self, coord: Coord) -> Option<Owner> {
        self.field(coord).map(|field| field.owner)
    }

    /// Index of the field `(d_column, d_row)` away from the field at `pos`.
    pub fn neighbor(&self, pos: usize, d_column: i8, d_row: i8) -> Option<usize> {
        let coord = self.fields.get(pos)?.coord.offset(d_column, d_row)?;
        self.index_of(coord)
    }

    /// Tags a square. A later call for the same square overwrites the earlier
    /// one, so two pieces detected on one square leave only the last.
    pub fn set_owner(&mut self, coord: Coord, owner: Owner) -> EngineResult<()> {
        let pos = self
            .index_of(coord)
            .ok_or(EngineError::UnknownField { coord })?;
        self.fields[pos].owner = owner;
        Ok(())
    }

    pub fn clear_owners(&mut self) {
        for field in &mut self.fields {
            field.owner = Owner::None;
        }
    }

    /// Owners aligned with `fields()`.
    pub fn owners(&self) -> Vec<Owner> {
        self.fields.iter().map(|field| field.owner).collect()
    }

    /// Number of fields owned by `owner`.
    pub fn count(&self, owner: Owner) -> usize {
        self.fields.iter().filter(|field| field.owner == owner).count()
    }
}
