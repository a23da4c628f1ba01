use std::collections::BTreeMap;

use serde_json::{Value, json};

use super::geojson::feature_collection;
use super::surface::{FeatureSet, LayerId, LayerSpec, MapSurfacePort};

/// A layer held by `SnapshotSurface`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLayer {
    pub spec: LayerSpec,
    pub data: FeatureSet,
    pub visible: bool,
}

/// Mutation applied to a `SnapshotSurface`, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    Add(LayerId),
    SetData(LayerId),
    SetVisible(LayerId, bool),
    Remove(LayerId),
}

/// In-memory surface that records layer state and can dump it as JSON.
#[derive(Debug, Default)]
pub struct SnapshotSurface {
    layers: BTreeMap<LayerId, SnapshotLayer>,
    ops: Vec<SurfaceOp>,
}

impl SnapshotSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn layer(&self, layer: LayerId) -> Option<&SnapshotLayer> {
        self.layers.get(&layer)
    }

    #[must_use]
    pub fn is_visible(&self, layer: LayerId) -> bool {
        self.layers.get(&layer).is_some_and(|entry| entry.visible)
    }

    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.keys().copied()
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Every layer with its spec, visibility and GeoJSON data.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let layers: serde_json::Map<String, Value> = self
            .layers
            .iter()
            .map(|(id, entry)| {
                (
                    id.as_str().to_owned(),
                    json!({
                        "spec": entry.spec,
                        "visible": entry.visible,
                        "data": feature_collection(&entry.data),
                    }),
                )
            })
            .collect();
        json!({ "layers": layers })
    }
}

impl MapSurfacePort for SnapshotSurface {
    fn has_layer(&self, layer: LayerId) -> bool {
        self.layers.contains_key(&layer)
    }

    fn add_layer(&mut self, spec: LayerSpec, data: FeatureSet) {
        self.ops.push(SurfaceOp::Add(spec.id));
        self.layers.insert(
            spec.id,
            SnapshotLayer {
                spec,
                data,
                visible: true,
            },
        );
    }

    fn set_data(&mut self, layer: LayerId, data: FeatureSet) {
        if let Some(entry) = self.layers.get_mut(&layer) {
            self.ops.push(SurfaceOp::SetData(layer));
            entry.data = data;
        }
    }

    fn set_visible(&mut self, layer: LayerId, visible: bool) {
        if let Some(entry) = self.layers.get_mut(&layer) {
            self.ops.push(SurfaceOp::SetVisible(layer, visible));
            entry.visible = visible;
        }
    }

    fn remove_layer(&mut self, layer: LayerId) {
        if self.layers.remove(&layer).is_some() {
            self.ops.push(SurfaceOp::Remove(layer));
        }
    }
}
