use indexmap::IndexMap;

use crate::api::layer::{
    BarLayer, ChartLayer, ColumnLayer, ComboLayer, DataDotLayer, LayerData, LayerKind, LineLayer,
    ScatterLayer, WaterfallLayer,
};
use crate::error::{AxisError, AxisResult};

/// Builds a layer instance from its tabular data.
pub type LayerFactory = Box<dyn Fn(LayerData) -> Box<dyn ChartLayer>>;

/// Registry mapping a chart-type tag to its layer factory.
///
/// Hosts register custom layer implementations under their own kind; the
/// built-in families are pre-registered by [`LayerRegistry::default`].
/// Insertion order is preserved so enumeration is deterministic.
pub struct LayerRegistry {
    factories: IndexMap<LayerKind, LayerFactory>,
}

impl LayerRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    pub fn register(&mut self, kind: LayerKind, factory: LayerFactory) {
        self.factories.insert(kind, factory);
    }

    #[must_use]
    pub fn contains(&self, kind: LayerKind) -> bool {
        self.factories.contains_key(&kind)
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<LayerKind> {
        self.factories.keys().copied().collect()
    }

    pub fn create(&self, kind: LayerKind, data: LayerData) -> AxisResult<Box<dyn ChartLayer>> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or_else(|| AxisError::UnknownLayerKind(format!("{kind:?}")))?;
        Ok(factory(data))
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(LayerKind::Line, Box::new(|data| Box::new(LineLayer::new(data))));
        registry.register(
            LayerKind::Column,
            Box::new(|data| Box::new(ColumnLayer::new(data))),
        );
        registry.register(LayerKind::Bar, Box::new(|data| Box::new(BarLayer::new(data))));
        registry.register(
            LayerKind::Combo,
            Box::new(|data| Box::new(ComboLayer::new(data))),
        );
        registry.register(
            LayerKind::Scatter,
            Box::new(|data| Box::new(ScatterLayer::new(data))),
        );
        registry.register(
            LayerKind::Waterfall,
            Box::new(|data| Box::new(WaterfallLayer::new(data))),
        );
        registry.register(
            LayerKind::DataDot,
            Box::new(|data| Box::new(DataDotLayer::new(data))),
        );
        registry
    }
}

impl std::fmt::Debug for LayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
