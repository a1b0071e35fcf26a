//! Clump records and their lifecycle
//!
//! `ClumpWorld` is the only owner of clumps. Callers hold `ClumpId` handles,
//! submit brush strokes through the world, and drain lifecycle events to
//! mirror creation and destruction in their own scene.

pub mod record;
pub mod world;

pub use record::{Clump, ClumpId, PhysicsHandoff};
pub use world::{ClumpWorld, DestroyReason, EditOutcome, LifecycleEvent, ProcessReport};
