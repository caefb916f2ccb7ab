//! Assignment Handlers

pub(crate) mod checkout;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod pending;
pub(crate) mod print;
pub(crate) mod update;
