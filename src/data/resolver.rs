use crate::data::payload::DataMap;

/// Source of data from the ambient request context (query string, launch arguments).
///
/// Consulted at construction, and by `preview`/`remove` when the host supplied no data.
pub trait DataResolver {
    fn resolve(&self) -> DataMap;
}

impl<F> DataResolver for F
where
    F: Fn() -> DataMap,
{
    fn resolve(&self) -> DataMap {
        self()
    }
}

/// Resolver returning a fixed payload. The default resolves to an empty map.
#[derive(Clone, Debug, Default)]
pub struct StaticData(pub DataMap);

impl DataResolver for StaticData {
    fn resolve(&self) -> DataMap {
        self.0.clone()
    }
}
