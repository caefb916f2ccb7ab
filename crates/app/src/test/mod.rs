//! Service test support: a shared Postgres container and per-test databases.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
