//! Scene model: direction frame, placed objects, fixed setup, and export

pub mod directions;
pub mod object;
pub mod state;
pub mod setup;
pub mod export;

pub use directions::{Direction, DirectionFrame};
pub use object::PlacedObject;
pub use state::Scene;
pub use setup::SceneSetup;
pub use export::{ObjectRecord, SceneCollection, SceneRecord};
