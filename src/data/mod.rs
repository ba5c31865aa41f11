pub(crate) mod payload;
pub(crate) mod resolver;
