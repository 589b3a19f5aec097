// Application layer - Use case interactors

pub mod container;
pub mod removal_interactor;

// Re-export interactors
pub use container::DefaultAppContainer;
pub use removal_interactor::{RemovalInteractor, RemovalOutcome, RemovalRequest};
