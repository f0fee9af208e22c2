use std::path::PathBuf;

use clap::Parser;
use shared::model::ExerciseDedup;

#[derive(Debug, Clone, Parser)]
#[clap(name = "exercise tracker")]
pub struct Cli {
    /// Static files served alongside the api
    #[clap(long, env, default_value = "public")]
    pub public_dir: PathBuf,
    /// Landing page served at `/`
    #[clap(long, env, default_value = "views/index.html")]
    pub index_file: PathBuf,
    #[clap(long, env, default_value = "exercise_tracker.sqlite")]
    pub sqlite_connection_string: String,
    /// How long to wait for a database connection before giving up
    #[clap(long, env, default_value = "5000")]
    pub database_connect_timeout_ms: u64,
    #[clap(long, env, default_value = "3000")]
    pub port: u16,
    #[clap(long, env, default_value = "0.0.0.0")]
    pub bind_addr: String,
    /// Which existing exercise record a newly logged exercise is folded into:
    /// global, per-user or never
    #[arg(long, env, default_value_t = ExerciseDedup::Global)]
    pub exercise_dedup: ExerciseDedup,
}
