//! Shared test fakes and utilities for the Arcana spread engine.

mod clock;
mod fixtures;
mod interpretation;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use fixtures::{sample_deck, sample_spread};
pub use interpretation::{FailingInterpretationService, StubInterpretationService};
pub use repository::{
    FailingDeckProvider, FailingSpreadRepository, InMemorySpreadRepository, LocalizedDeckProvider,
    StaticDeckProvider,
};
pub use rng::{MockRng, SequenceRng};
