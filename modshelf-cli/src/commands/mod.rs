pub(crate) mod categories;
pub(crate) mod config;
pub(crate) mod detail;
pub(crate) mod search;
pub(crate) mod versions;
