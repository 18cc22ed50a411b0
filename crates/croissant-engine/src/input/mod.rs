pub mod queue;
pub mod state;

pub use queue::{InputEvent, InputQueue};
pub use state::{map_client_to_logical, InputState};
