mod events;
mod ledger;
mod state;
mod system_api;

pub use events::*;
pub use ledger::*;
pub use state::*;
pub use system_api::*;
