//! Model partitioning, disassembly and scroll timelines for the drone showcase.
//!
//! Nothing in here touches the renderer; Bevy is only used for math and ECS types.

pub mod bounds;
pub mod direction;
pub mod disassembly;
pub mod easing;
pub mod fallback;
pub mod partition;
pub mod pose;
pub mod rig;
pub mod scroll;
pub mod sections;

pub use bounds::{Bounds3, NORMALIZED_SIZE, Normalization};
pub use direction::{DirectionSource, FixedDirections, RandomDirections};
pub use disassembly::{MAX_DISTANCE, PoseSink};
pub use fallback::{FALLBACK_PIECES, FallbackPiece, FallbackShape};
pub use partition::{
    FALLBACK_PARTS_COUNT, LeafRecord, PRIMARY_PARTS_COUNT, PartGroup, PartTint, partition,
};
pub use pose::LeafPose;
pub use rig::DisassemblyRig;
pub use scroll::ScrollTrack;
pub use sections::{
    SCROLL_LENGTH, SECTION_COUNT, SECTIONS, SectionCursor, StageState, explode_progress_at,
    section_at, stage_at,
};

#[cfg(test)]
mod tests;
