pub(crate) mod adapter;
pub(crate) mod gate;
pub(crate) mod link;
