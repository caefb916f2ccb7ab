//! Extension traits

mod depot;
mod result;
mod status;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use status::{internal_error, set_expose_error_detail};
