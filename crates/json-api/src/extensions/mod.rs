//! Extension traits

mod depot;
mod evaluation_date;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use evaluation_date::EvaluationDateExt as _;
pub(crate) use result::ResultExt as _;
