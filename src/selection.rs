//! The version × chain × residue selection state machine.
//!
//! Every transition works on a copy of the state and commits only on
//! success, so a rejected interaction leaves the selection untouched.
//! After every committed transition the selected residue is valid for the
//! selected version.

use serde::Serialize;

use crate::error::{IndexKind, IrisError};
use crate::model::ModelData;

/// Residue interaction phase, from the segment event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueAction {
    /// Pointer pressed on a segment.
    Begin,
    /// Pointer entered a segment; only honoured while dragging.
    Move,
    /// Pointer released.
    End,
}

impl ResidueAction {
    /// Decode the markup's numeric action code (1 = begin, 2 = move,
    /// 3 = end).
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Begin),
            2 => Some(Self::Move),
            3 => Some(Self::End),
            _ => None,
        }
    }
}

/// Which layer of the view a transition invalidated. Later variants imply
/// the earlier ones must be redrawn too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Change {
    /// Nothing visible changed.
    None,
    /// The selected residue moved.
    Residue,
    /// The selected chain changed.
    Chain,
    /// The selected version changed.
    Version,
}

/// The current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    /// Selected model version.
    pub version: usize,
    /// Selected chain.
    pub chain: usize,
    /// Selected residue position in the chain's alignment.
    pub residue: usize,
    /// Whether a residue drag is in progress.
    pub dragging: bool,
}

impl SelectionState {
    /// Select (`version`, `chain`) starting the residue search at
    /// `residue`. The residue advances to the next valid position if
    /// needed.
    pub fn with_selection(
        data: &ModelData,
        version: usize,
        chain: usize,
        residue: usize,
    ) -> Result<Self, IrisError> {
        check_version(data, version)?;
        let entry = data.chain(chain)?;
        if residue >= entry.aligned_length {
            return Err(IrisError::out_of_range(
                IndexKind::Residue,
                residue,
                entry.aligned_length,
            ));
        }
        let mut state = Self {
            version,
            chain,
            residue,
            dragging: false,
        };
        state.land_on_valid_residue(data)?;
        Ok(state)
    }

    /// Cycle to the next version, wrapping around.
    pub fn advance_version(
        &mut self,
        data: &ModelData,
    ) -> Result<Change, IrisError> {
        let num_versions = data.num_versions();
        if num_versions == 0 {
            return Err(IrisError::out_of_range(IndexKind::Version, 0, 0));
        }
        let mut next = *self;
        next.version = (self.version + 1) % num_versions;
        next.land_on_valid_residue(data)?;
        *self = next;
        Ok(Change::Version)
    }

    /// Select `chain`, resetting the residue to the first valid position
    /// and cancelling any drag.
    pub fn select_chain(
        &mut self,
        data: &ModelData,
        chain: usize,
    ) -> Result<Change, IrisError> {
        let _ = data.chain(chain)?;
        let mut next = *self;
        next.chain = chain;
        next.residue = 0;
        next.dragging = false;
        next.land_on_valid_residue(data)?;
        *self = next;
        Ok(Change::Chain)
    }

    /// Apply one residue pointer event.
    ///
    /// `Begin` always starts a drag; `Move` is ignored unless dragging;
    /// `End` stops the drag without moving the selection. A residue that is
    /// invalid for the current version is discarded.
    pub fn residue_interaction(
        &mut self,
        data: &ModelData,
        action: ResidueAction,
        residue: usize,
    ) -> Result<Change, IrisError> {
        match action {
            ResidueAction::End => {
                self.dragging = false;
                return Ok(Change::None);
            }
            ResidueAction::Move if !self.dragging => return Ok(Change::None),
            ResidueAction::Begin | ResidueAction::Move => {}
        }

        let entry = data.chain(self.chain)?;
        if residue >= entry.aligned_length {
            return Err(IrisError::out_of_range(
                IndexKind::Residue,
                residue,
                entry.aligned_length,
            ));
        }

        self.dragging = true;
        if !entry.is_valid(self.version, residue) {
            log::debug!(
                "residue {residue} absent in version {}, ignored",
                self.version
            );
            return Ok(Change::None);
        }
        if residue == self.residue {
            return Ok(Change::None);
        }
        self.residue = residue;
        Ok(Change::Residue)
    }

    /// Advance the residue until it is valid for the selected version.
    /// Visits each position at most once.
    fn land_on_valid_residue(
        &mut self,
        data: &ModelData,
    ) -> Result<(), IrisError> {
        let entry = data.chain(self.chain)?;
        let len = entry.aligned_length;
        if len == 0 {
            return Err(IrisError::NoValidResidue {
                chain: self.chain,
                version: self.version,
            });
        }
        let start = self.residue % len;
        let found = (0..len)
            .map(|step| (start + step) % len)
            .find(|&r| entry.is_valid(self.version, r));
        match found {
            Some(residue) => {
                self.residue = residue;
                Ok(())
            }
            None => Err(IrisError::NoValidResidue {
                chain: self.chain,
                version: self.version,
            }),
        }
    }

    /// Whether the selection points at a residue that exists.
    #[must_use]
    pub fn is_consistent(&self, data: &ModelData) -> bool {
        data.chain(self.chain)
            .is_ok_and(|entry| entry.is_valid(self.version, self.residue))
    }
}

fn check_version(data: &ModelData, version: usize) -> Result<(), IrisError> {
    if version < data.num_versions() {
        Ok(())
    } else {
        Err(IrisError::out_of_range(
            IndexKind::Version,
            version,
            data.num_versions(),
        ))
    }
}
