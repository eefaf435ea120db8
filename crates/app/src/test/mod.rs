//! Service test harness backed by a disposable PostgreSQL database.

mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
