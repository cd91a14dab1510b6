#![allow(dead_code)]

//! Stub collaborators shared by the integration tests: a recording host, a
//! scripted fetcher, and in-memory stand-ins for the data model, the image
//! pipelines, and the lookup-table manager.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use probeview::{
    ChartPainter, ChartRenderer, ChartUpdate, CompositeImagePipeline, Descriptor,
    DescriptorFetcher, FloatImagePipeline, Host, ImagePipelineFactory, LookupTableManager,
    ModelChange, QueryDataModel, QueryDataModelFactory, ResolvedViewer, TIME_DIMENSION, ViewMount,
    ViewerEnv, ViewerResult,
};

#[derive(Default)]
pub struct RecordingHost {
    pub events: RefCell<Vec<String>>,
    pub deferred: RefCell<Vec<Box<dyn FnOnce()>>>,
    pub refuse_mounts: Cell<bool>,
}

impl RecordingHost {
    pub fn run_deferred(&self) {
        let tasks: Vec<_> = self.deferred.borrow_mut().drain(..).collect();
        for task in tasks {
            task();
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.strip_prefix("alert:").map(str::to_string))
            .collect()
    }

    pub fn mounts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.strip_prefix("mount:").map(str::to_string))
            .collect()
    }
}

impl Host for RecordingHost {
    fn set_background(&self, css_color: &str) {
        self.events
            .borrow_mut()
            .push(format!("background:{css_color}"));
    }

    fn mount(&self, view: ViewMount) -> ViewerResult<()> {
        if self.refuse_mounts.get() {
            return Err(anyhow::anyhow!("container detached").into());
        }
        self.events
            .borrow_mut()
            .push(format!("mount:{:?}", view.kind()));
        Ok(())
    }

    fn request_refresh(&self) {
        self.events.borrow_mut().push("refresh".to_string());
    }

    fn alert(&self, message: &str) {
        self.events.borrow_mut().push(format!("alert:{message}"));
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.deferred.borrow_mut().push(task);
    }
}

/// Delivers a scripted fetch result synchronously, standing in for the
/// event loop's completion callback.
pub struct ScriptedFetcher {
    pub result: RefCell<Option<ViewerResult<serde_json::Value>>>,
}

impl ScriptedFetcher {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            result: RefCell::new(Some(Ok(body))),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: RefCell::new(Some(Err(probeview::ViewerError::fetch(message)))),
        }
    }
}

impl DescriptorFetcher for ScriptedFetcher {
    fn fetch(&self, _url: &str, on_done: Box<dyn FnOnce(ViewerResult<serde_json::Value>)>) {
        let result = self
            .result
            .borrow_mut()
            .take()
            .expect("scripted fetch fired twice");
        on_done(result);
    }
}

pub struct StubModel {
    pub descriptor: Descriptor,
    pub time_size: Cell<usize>,
    pub fetches: Cell<usize>,
    pub animated: RefCell<Vec<String>>,
}

impl QueryDataModel for StubModel {
    fn fetch_data(&self) {
        self.fetches.set(self.fetches.get() + 1);
    }

    fn get_size(&self, dimension: &str) -> Option<usize> {
        (dimension == TIME_DIMENSION).then(|| self.time_size.get())
    }

    fn set_animation_flag(&self, argument: &str, animate: bool) {
        if animate {
            self.animated.borrow_mut().push(argument.to_string());
        }
    }

    fn original_data(&self) -> &Descriptor {
        &self.descriptor
    }
}

pub struct StubModelFactory {
    pub time_size: usize,
    pub last: RefCell<Option<Rc<StubModel>>>,
}

impl QueryDataModelFactory for StubModelFactory {
    fn create(&self, descriptor: &Descriptor, _base_path: &str) -> Rc<dyn QueryDataModel> {
        let model = Rc::new(StubModel {
            descriptor: descriptor.clone(),
            time_size: Cell::new(self.time_size),
            fetches: Cell::new(0),
            animated: RefCell::new(Vec::new()),
        });
        *self.last.borrow_mut() = Some(Rc::clone(&model));
        model
    }
}

#[derive(Default)]
pub struct StubFloatPipeline {
    pub updates: Cell<usize>,
    pub color_by: RefCell<Vec<(String, String)>>,
    pub listener: RefCell<Option<Box<dyn FnMut(&ModelChange)>>>,
    /// Probe data emitted to the listener on every `update()`.
    pub scripted_change: RefCell<Option<ModelChange>>,
}

impl StubFloatPipeline {
    pub fn fire_model_change(&self, change: &ModelChange) {
        if let Some(listener) = self.listener.borrow_mut().as_mut() {
            listener(change);
        }
    }
}

impl FloatImagePipeline for StubFloatPipeline {
    fn update(&self) {
        self.updates.set(self.updates.get() + 1);
        let change = self.scripted_change.borrow().clone();
        if let Some(change) = change {
            self.fire_model_change(&change);
        }
    }

    fn update_layer_color_by(&self, layer: &str, field: &str) {
        self.color_by
            .borrow_mut()
            .push((layer.to_string(), field.to_string()));
    }

    fn on_model_change(&self, listener: Box<dyn FnMut(&ModelChange)>) {
        *self.listener.borrow_mut() = Some(listener);
    }
}

#[derive(Default)]
pub struct StubCompositePipeline {
    pub updates: Cell<usize>,
}

impl CompositeImagePipeline for StubCompositePipeline {
    fn update(&self) {
        self.updates.set(self.updates.get() + 1);
    }
}

#[derive(Default)]
pub struct StubImageFactory {
    pub float: RefCell<Option<Rc<StubFloatPipeline>>>,
    pub composite: RefCell<Option<Rc<StubCompositePipeline>>>,
    /// Probe data the next float pipeline emits on `update()`.
    pub scripted_change: RefCell<Option<ModelChange>>,
}

impl ImagePipelineFactory for StubImageFactory {
    fn float_image(&self, _model: Rc<dyn QueryDataModel>) -> Rc<dyn FloatImagePipeline> {
        let pipeline = Rc::new(StubFloatPipeline::default());
        *pipeline.scripted_change.borrow_mut() = self.scripted_change.borrow().clone();
        *self.float.borrow_mut() = Some(Rc::clone(&pipeline));
        pipeline
    }

    fn composite(&self, _model: Rc<dyn QueryDataModel>) -> Rc<dyn CompositeImagePipeline> {
        let pipeline = Rc::new(StubCompositePipeline::default());
        *self.composite.borrow_mut() = Some(Rc::clone(&pipeline));
        pipeline
    }
}

pub struct ScriptedLutManager {
    pub active: RefCell<String>,
    pub listener: RefCell<Option<Box<dyn FnMut(&str)>>>,
}

impl ScriptedLutManager {
    pub fn new(active: &str) -> Self {
        Self {
            active: RefCell::new(active.to_string()),
            listener: RefCell::new(None),
        }
    }

    pub fn change_active(&self, field: &str) {
        *self.active.borrow_mut() = field.to_string();
        if let Some(listener) = self.listener.borrow_mut().as_mut() {
            listener(field);
        }
    }
}

impl LookupTableManager for ScriptedLutManager {
    fn get_active_field(&self) -> String {
        self.active.borrow().clone()
    }

    fn on_active_lookup_table_change(&self, listener: Box<dyn FnMut(&str)>) {
        *self.listener.borrow_mut() = Some(listener);
    }
}

/// Chart renderer that subscribes through the painter's data-ready channel
/// and records every pushed update, like the real plotting layer would.
#[derive(Default)]
pub struct CollectingRenderer {
    pub updates: Rc<RefCell<Vec<ChartUpdate>>>,
    pub resizes: Cell<usize>,
}

impl ChartRenderer for CollectingRenderer {
    fn attach(&self, painter: Rc<dyn ChartPainter>) {
        assert!(!painter.is_ready(), "the bridge must never be paintable");
        let sink = Rc::clone(&self.updates);
        painter.on_data_ready(Box::new(move |update| {
            sink.borrow_mut().push(update.clone());
        }));
    }

    fn update_dimensions(&self) {
        self.resizes.set(self.resizes.get() + 1);
    }
}

pub struct World {
    pub env: Rc<ViewerEnv>,
    pub host: Rc<RecordingHost>,
    pub models: Rc<StubModelFactory>,
    pub images: Rc<StubImageFactory>,
    pub lut: Rc<ScriptedLutManager>,
    pub renderer: Rc<CollectingRenderer>,
}

impl World {
    pub fn new(fetcher: ScriptedFetcher, time_size: usize) -> Self {
        let host = Rc::new(RecordingHost::default());
        let models = Rc::new(StubModelFactory {
            time_size,
            last: RefCell::new(None),
        });
        let images = Rc::new(StubImageFactory::default());
        let lut = Rc::new(ScriptedLutManager::new("pressure"));
        let renderer = Rc::new(CollectingRenderer::default());
        let env = Rc::new(ViewerEnv::new(
            Rc::clone(&host) as Rc<dyn Host>,
            Rc::new(fetcher) as Rc<dyn DescriptorFetcher>,
            Rc::clone(&models) as Rc<dyn QueryDataModelFactory>,
            Rc::clone(&images) as Rc<dyn ImagePipelineFactory>,
            Rc::clone(&lut) as Rc<dyn LookupTableManager>,
            Rc::clone(&renderer) as Rc<dyn ChartRenderer>,
        ));
        Self {
            env,
            host,
            models,
            images,
            lut,
            renderer,
        }
    }

    /// Run `load` and capture the resolved viewer, if resolution succeeded.
    pub fn load(&self, url: &str) -> Option<ResolvedViewer> {
        let resolved = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&resolved);
        probeview::load(
            url,
            Rc::clone(&self.env),
            Box::new(move |viewer| {
                *sink.borrow_mut() = Some(viewer);
            }),
        );
        resolved.borrow_mut().take()
    }
}
