pub use stake_engine_interface::prelude::*;
pub use std::collections::{BTreeMap, BTreeSet};
pub use tracing::{debug, info, warn};
