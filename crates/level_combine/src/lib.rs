#![forbid(unsafe_code)]
//! level_combine: build new platformer levels out of pieces of existing ones.
//!
//! Modules:
//! - geometry: integer bounding boxes and placement offsets
//! - level: objects, typed attribute access, and the per-level transforms (rotate, align, collide, blit, explode)
//! - format: the level-file document and its canonical text encoding
//! - storage: published/user level collections on disk
//! - combine: variant expansion, sampling, collision-checked placement, events
//!
//! For the command-line driver, see the `level_combine_cli` crate.
pub mod combine;
pub mod error;
pub mod format;
pub mod geometry;
pub mod level;
pub mod storage;

/// Convenient re-exports for common types. Import with `use level_combine::prelude::*;`.
pub mod prelude {
    pub use crate::combine::config::{CombineConfig, OutputNaming};
    pub use crate::combine::events::{
        CombineEvent, CombineEventKind, EventSink, FnSink, VecSink,
    };
    pub use crate::combine::runner::{
        combine, expand_variants, place, prepare, sample, CombineResult, Combiner,
        PlacementStats, PreparedVariant, SavedCombination,
    };
    pub use crate::error::{Error, Result};
    pub use crate::format::{decode, encode, Completion, GameMode, LevelFile, LevelSettings};
    pub use crate::geometry::{Offset, Rect};
    pub use crate::level::field::Field;
    pub use crate::level::object::{Attributes, LevelObject};
    pub use crate::level::{ExplodeChances, Level};
    pub use crate::storage::{generated_file_name, Collection, LevelStore, StoredLevel};
}
