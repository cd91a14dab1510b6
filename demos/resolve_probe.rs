//! Resolve a probe descriptor against in-memory collaborators and drive a
//! cursor move, printing every event the host and chart renderer see.
//!
//! ```sh
//! cargo run --example resolve_probe
//! ```

use std::{cell::RefCell, rc::Rc};

use probeview::{
    ChartPainter, ChartRenderer, CompositeImagePipeline, Descriptor, DescriptorFetcher, Field,
    FloatImagePipeline, Host, ImagePipelineFactory, LookupTableManager, ModelChange, ProbeData,
    QueryDataModel, QueryDataModelFactory, TIME_DIMENSION, ViewMount, ViewerEnv, ViewerResult,
    load,
};

struct PrintingHost {
    deferred: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Host for PrintingHost {
    fn set_background(&self, css_color: &str) {
        println!("host: background set to {css_color}");
    }

    fn mount(&self, view: ViewMount) -> ViewerResult<()> {
        println!("host: mounted {:?} view", view.kind());
        Ok(())
    }

    fn request_refresh(&self) {
        println!("host: re-render requested");
    }

    fn alert(&self, message: &str) {
        println!("host: ALERT {message}");
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.deferred.borrow_mut().push(task);
    }
}

struct InlineFetcher {
    body: serde_json::Value,
}

impl DescriptorFetcher for InlineFetcher {
    fn fetch(&self, url: &str, on_done: Box<dyn FnOnce(ViewerResult<serde_json::Value>)>) {
        println!("fetch: GET {url}");
        on_done(Ok(self.body.clone()));
    }
}

struct DemoModel {
    descriptor: Descriptor,
}

impl QueryDataModel for DemoModel {
    fn fetch_data(&self) {
        println!("model: eager fetch dispatched");
    }

    fn get_size(&self, dimension: &str) -> Option<usize> {
        (dimension == TIME_DIMENSION).then_some(3)
    }

    fn set_animation_flag(&self, argument: &str, animate: bool) {
        println!("model: animation flag {argument} = {animate}");
    }

    fn original_data(&self) -> &Descriptor {
        &self.descriptor
    }
}

struct DemoModelFactory;

impl QueryDataModelFactory for DemoModelFactory {
    fn create(&self, descriptor: &Descriptor, base_path: &str) -> Rc<dyn QueryDataModel> {
        println!("model: constructed with base path {base_path}");
        Rc::new(DemoModel {
            descriptor: descriptor.clone(),
        })
    }
}

#[derive(Default)]
struct DemoFloatPipeline {
    listener: RefCell<Option<Box<dyn FnMut(&ModelChange)>>>,
}

impl FloatImagePipeline for DemoFloatPipeline {
    fn update(&self) {
        println!("pipeline: building probe frame");
        let change = ModelChange {
            data: ProbeData::with_fields(vec![
                Field {
                    name: "pressure".to_string(),
                    data: vec![101.3, 99.8, 102.1],
                    color: None,
                },
                Field {
                    name: "temperature".to_string(),
                    data: vec![293.0, 295.5, 294.2],
                    color: None,
                },
            ]),
        };
        if let Some(listener) = self.listener.borrow_mut().as_mut() {
            listener(&change);
        }
    }

    fn update_layer_color_by(&self, layer: &str, field: &str) {
        println!("pipeline: layer '{layer}' colored by '{field}'");
    }

    fn on_model_change(&self, listener: Box<dyn FnMut(&ModelChange)>) {
        *self.listener.borrow_mut() = Some(listener);
    }
}

struct DemoComposite;

impl CompositeImagePipeline for DemoComposite {
    fn update(&self) {}
}

struct DemoImageFactory;

impl ImagePipelineFactory for DemoImageFactory {
    fn float_image(
        &self,
        _model: Rc<dyn QueryDataModel>,
    ) -> Rc<dyn FloatImagePipeline> {
        Rc::new(DemoFloatPipeline::default())
    }

    fn composite(&self, _model: Rc<dyn QueryDataModel>) -> Rc<dyn CompositeImagePipeline> {
        Rc::new(DemoComposite)
    }
}

struct DemoLut;

impl LookupTableManager for DemoLut {
    fn get_active_field(&self) -> String {
        "pressure".to_string()
    }

    fn on_active_lookup_table_change(&self, _listener: Box<dyn FnMut(&str)>) {}
}

struct PrintingRenderer;

impl ChartRenderer for PrintingRenderer {
    fn attach(&self, painter: Rc<dyn ChartPainter>) {
        painter.on_data_ready(Box::new(|update| {
            match &update.hover {
                Some(hover) => {
                    let points: Vec<_> = hover
                        .hover_list
                        .iter()
                        .map(|entry| entry.point_number)
                        .collect();
                    println!("chart: marker update, hover points {points:?}");
                }
                None => {
                    let names: Vec<_> =
                        update.traces.iter().map(|t| t.name.as_str()).collect();
                    println!("chart: data update, traces {names:?}");
                }
            }
        }));
    }

    fn update_dimensions(&self) {
        println!("chart: dimensions updated");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let descriptor_body = serde_json::json!({
        "type": ["tonic-query-data-model", "in-situ-data-prober"],
        "metadata": {"backgroundColor": "#111111", "probePalette": "Set1"},
        "FloatImage": {"layers": [{"name": "pressure"}]},
        "arguments_active": ["time"]
    });

    let host = Rc::new(PrintingHost {
        deferred: RefCell::new(Vec::new()),
    });
    let env = Rc::new(ViewerEnv::new(
        Rc::clone(&host) as Rc<dyn Host>,
        Rc::new(InlineFetcher {
            body: descriptor_body,
        }),
        Rc::new(DemoModelFactory),
        Rc::new(DemoImageFactory),
        Rc::new(DemoLut),
        Rc::new(PrintingRenderer),
    ));

    let resolved = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&resolved);
    load(
        "http://example.test/info.json",
        env,
        Box::new(move |viewer| {
            *sink.borrow_mut() = Some(viewer);
        }),
    );

    // The deferred first build runs once the mount has settled.
    let tasks: Vec<_> = host.deferred.borrow_mut().drain(..).collect();
    for task in tasks {
        task();
    }

    if let Some(viewer) = resolved.borrow().as_ref() {
        for position in [0.0, 0.5, 1.0] {
            viewer.probes[0].synchronizer.set_cursor(position);
        }
        println!("done: cursor sweep delivered");
    }
}
