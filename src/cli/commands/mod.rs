mod categories;
mod distance;
mod info;
mod search;
mod seed;
mod serve;

pub use categories::cmd_categories;
pub use distance::cmd_distance;
pub use info::cmd_spot_info;
pub use search::{SearchArgs, cmd_nearby, cmd_search};
pub use seed::cmd_seed;
pub use serve::cmd_serve;

use crate::config::Config;
use crate::db::Store;
use crate::state::SharedState;

/// Opens the configured database and wires the services for a one-shot command.
async fn open_state(config: &Config) -> anyhow::Result<SharedState> {
    let store = Store::new(&config.general.database_path).await?;
    Ok(SharedState::with_store(config.clone(), store))
}
