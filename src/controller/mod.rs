pub(crate) mod builder;
pub(crate) mod machine;
pub(crate) mod observer;
