use std::sync::Arc;

use axum::extract::FromRef;
use deadpool_sqlite::Pool;

mod args;
pub use args::*;

use crate::cli::Cli;

/// Everything a handler can reach. Built once at startup and handed to the
/// router, nothing is global.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
    pub args: Arc<Cli>,
}

impl AppState {
    pub fn new(pool: Pool, args: Cli) -> Self {
        Self {
            pool,
            args: Arc::new(args),
        }
    }
}

impl FromRef<AppState> for Pool {
    fn from_ref(state: &AppState) -> Self {
        // pool uses an Arc internally so clone is cheap
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Cli> {
    fn from_ref(state: &AppState) -> Self {
        state.args.clone()
    }
}
