//! # framedim-structure
//!
//! Crystal structure records and the polymer expansion that feeds the
//! dimensionality classifier.
//!
//! | Item | Purpose |
//! |---|---|
//! | [`CrystalStructure`] | Cell, atoms (fractional) and bonds with lattice images |
//! | [`StructureSource`] | Lookup by identifier ([`JsonDirectorySource`], [`MemorySource`]) |
//! | [`Component`] | Connected piece of the bond graph, polymeric if it has translations |
//! | [`PolymericUnit`] | Unwrapped, hydrogen-free component ready for expansion |
//! | [`PolymerExpander`] | [`NetworkExpansionService`](framedim_classify::NetworkExpansionService) growing lattice images |

pub mod cell;
pub mod components;
pub mod elements;
pub mod error;
pub mod expand;
pub mod model;
pub mod source;
pub mod unit;

pub use cell::{CellBasis, UnitCell};
pub use components::{find_components, heaviest, Component};
pub use elements::{atomic_weight, is_hydrogen};
pub use error::StructureError;
pub use expand::{PolymerExpander, DEFAULT_MAX_ATOMS};
pub use model::{Atom, Bond, CrystalStructure, MAX_BOND_IMAGE};
pub use source::{JsonDirectorySource, MemorySource, StructureSource};
pub use unit::{PolymericUnit, UnitAtom};
