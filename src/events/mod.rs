//! Schedule events and the ordered timeline buffer

pub mod event;
pub mod timeline;

pub use event::{CleanTargetInfo, Event, InteractionInfo};
pub use timeline::Timeline;
