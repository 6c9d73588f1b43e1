pub mod candidate;
pub mod context;
pub mod decision;
pub mod generated;
pub mod item;
pub mod location;
pub mod schema;

pub use candidate::{Candidate, CandidateSet};
pub use generated::GeneratedItem;
pub use item::{IMAGE_MARKER, ItemImage, SearchInput, StoredItem};
pub use location::{Confidence, ItemLocation};
pub use schema::{Field, FieldKind, OutputSchema, SchemaViolation, StructuredOutput};
