pub mod cache;
pub mod catalog;
pub mod interpreter;
pub mod publisher;

pub use cache::{CacheError, PlaylistCache};
pub use catalog::{CatalogError, CatalogProvider};
pub use interpreter::{InterpreterError, NlInterpreter};
pub use publisher::{PlaylistPublisher, PublishError};
