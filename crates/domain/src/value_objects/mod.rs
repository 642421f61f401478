//! Value objects - Immutable objects defined by their attributes

mod gating;
mod position;
mod visual;

pub use gating::GatingRules;
pub use position::Position;
pub use visual::{LocalizedText, SoundCue, SoundTrigger, Visual, FALLBACK_LOCALE};
