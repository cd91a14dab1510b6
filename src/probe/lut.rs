use std::rc::Rc;

use crate::{
    descriptor::model::Descriptor, foundation::error::ViewerResult,
    probe::sync::FloatImagePipeline,
};

/// External component owning the active color-mapping field shared across
/// image layers.
pub trait LookupTableManager {
    fn get_active_field(&self) -> String;
    /// Register a listener invoked with the new field name on every change.
    fn on_active_lookup_table_change(&self, listener: Box<dyn FnMut(&str)>);
}

/// Keeps the image pipeline's single layer colored by the lookup-table
/// manager's active field.
///
/// Exactly one image layer is supported; connecting against a descriptor
/// declaring any other layer count fails fast.
#[derive(Debug)]
pub struct LookupTableLink {
    layer: String,
}

impl LookupTableLink {
    /// Apply the currently active field to the descriptor's single layer and
    /// keep re-applying it on every active-field change.
    pub fn connect(
        manager: &Rc<dyn LookupTableManager>,
        pipeline: &Rc<dyn FloatImagePipeline>,
        descriptor: &Descriptor,
    ) -> ViewerResult<Self> {
        let layer = descriptor.probe_layer()?.name.clone();

        pipeline.update_layer_color_by(&layer, &manager.get_active_field());

        let pipeline = Rc::clone(pipeline);
        let listener_layer = layer.clone();
        manager.on_active_lookup_table_change(Box::new(move |field| {
            pipeline.update_layer_color_by(&listener_layer, field);
        }));

        Ok(Self { layer })
    }

    /// Name of the linked image layer.
    pub fn layer(&self) -> &str {
        &self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{foundation::error::ViewerError, probe::sync::ModelChange};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPipeline {
        color_by: RefCell<Vec<(String, String)>>,
    }

    impl FloatImagePipeline for RecordingPipeline {
        fn update(&self) {}

        fn update_layer_color_by(&self, layer: &str, field: &str) {
            self.color_by
                .borrow_mut()
                .push((layer.to_string(), field.to_string()));
        }

        fn on_model_change(&self, _listener: Box<dyn FnMut(&ModelChange)>) {}
    }

    struct ScriptedManager {
        active: RefCell<String>,
        listener: RefCell<Option<Box<dyn FnMut(&str)>>>,
    }

    impl ScriptedManager {
        fn new(active: &str) -> Rc<Self> {
            Rc::new(Self {
                active: RefCell::new(active.to_string()),
                listener: RefCell::new(None),
            })
        }

        fn change_active(&self, field: &str) {
            *self.active.borrow_mut() = field.to_string();
            if let Some(listener) = self.listener.borrow_mut().as_mut() {
                listener(field);
            }
        }
    }

    impl LookupTableManager for ScriptedManager {
        fn get_active_field(&self) -> String {
            self.active.borrow().clone()
        }

        fn on_active_lookup_table_change(&self, listener: Box<dyn FnMut(&str)>) {
            *self.listener.borrow_mut() = Some(listener);
        }
    }

    fn single_layer_descriptor() -> Descriptor {
        Descriptor::from_value(serde_json::json!({
            "type": ["tonic-query-data-model", "in-situ-data-prober"],
            "FloatImage": {"layers": [{"name": "temperature"}]}
        }))
        .unwrap()
    }

    #[test]
    fn applies_active_field_on_connect() {
        let manager = ScriptedManager::new("pressure");
        let pipeline = Rc::new(RecordingPipeline::default());
        let link = LookupTableLink::connect(
            &(Rc::clone(&manager) as Rc<dyn LookupTableManager>),
            &(Rc::clone(&pipeline) as Rc<dyn FloatImagePipeline>),
            &single_layer_descriptor(),
        )
        .unwrap();

        assert_eq!(link.layer(), "temperature");
        assert_eq!(
            pipeline.color_by.borrow().as_slice(),
            &[("temperature".to_string(), "pressure".to_string())]
        );
    }

    #[test]
    fn reapplies_on_every_active_field_change() {
        let manager = ScriptedManager::new("pressure");
        let pipeline = Rc::new(RecordingPipeline::default());
        let _link = LookupTableLink::connect(
            &(Rc::clone(&manager) as Rc<dyn LookupTableManager>),
            &(Rc::clone(&pipeline) as Rc<dyn FloatImagePipeline>),
            &single_layer_descriptor(),
        )
        .unwrap();

        manager.change_active("velocity");
        manager.change_active("density");

        let applied = pipeline.color_by.borrow();
        assert_eq!(applied.len(), 3);
        assert_eq!(applied[1], ("temperature".to_string(), "velocity".to_string()));
        assert_eq!(applied[2], ("temperature".to_string(), "density".to_string()));
    }

    #[test]
    fn refuses_multi_layer_descriptors() {
        let descriptor = Descriptor::from_value(serde_json::json!({
            "type": ["tonic-query-data-model", "in-situ-data-prober"],
            "FloatImage": {"layers": [{"name": "a"}, {"name": "b"}]}
        }))
        .unwrap();

        let manager = ScriptedManager::new("pressure");
        let pipeline = Rc::new(RecordingPipeline::default());
        let err = LookupTableLink::connect(
            &(manager as Rc<dyn LookupTableManager>),
            &(Rc::clone(&pipeline) as Rc<dyn FloatImagePipeline>),
            &descriptor,
        )
        .unwrap_err();

        assert!(matches!(err, ViewerError::Validation(_)));
        // Nothing was applied before the guard fired.
        assert!(pipeline.color_by.borrow().is_empty());
    }
}
