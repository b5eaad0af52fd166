mod env;

pub use env::SyncEnv;
