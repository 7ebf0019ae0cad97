pub(crate) mod command;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod context;
pub(crate) mod effects;
pub(crate) mod outcome;
pub(crate) mod storage;
