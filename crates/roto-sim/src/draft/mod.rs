// Draft engine: team rosters and snake-order allocation.

pub mod snake;
pub mod team;

pub use snake::{run_draft, DraftError};
pub use team::Team;
