pub mod audio;
mod collaborator_factory;
pub mod llm;
pub mod observability;
pub mod storage;

pub use collaborator_factory::{CollaboratorFactory, CollaboratorFactoryError};
