//! Random sampling for interactions and volumes
//!
//! Both samplers take the random source as an explicit argument so the whole
//! generation run draws from one seedable stream.

pub mod interaction;
pub mod volume;

pub use interaction::InteractionSampler;
pub use volume::VolumeModel;
