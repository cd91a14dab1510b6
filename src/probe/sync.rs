use std::{cell::Cell, rc::Rc};

use crate::{
    chart::bridge::{ChartDataBridge, ChartPainter},
    chart::trace::ProbeData,
    descriptor::model::Descriptor,
    foundation::error::ViewerResult,
    probe::lut::{LookupTableLink, LookupTableManager},
    viewer::host::{ChartRenderer, Host},
};

/// Fresh probe data extracted by the image pipeline after a model change
/// (new data available, layer change, or active-field change).
#[derive(Clone, Debug, Default)]
pub struct ModelChange {
    pub data: ProbeData,
}

/// The real time-aware image builder, reached through a trait so the engine
/// never touches imaging internals.
pub trait FloatImagePipeline {
    /// Trigger a (re)build of the current image and probe data.
    fn update(&self);

    /// Color the named layer by the given field.
    fn update_layer_color_by(&self, layer: &str, field: &str);

    /// Register the model-change listener.
    fn on_model_change(&self, listener: Box<dyn FnMut(&ModelChange)>);
}

/// Keeps the image view and the synthetic time chart consistent.
///
/// On every model change the synchronizer refreshes the chart through the
/// data bridge first (data, then the last known marker position), and only
/// then asks the host for a full re-render. The two refresh paths are
/// strictly sequential; callers may rely on the chart listener having seen
/// the new data by the time the re-render request lands.
pub struct TimeProbeSynchronizer {
    bridge: Rc<ChartDataBridge>,
    lut_link: LookupTableLink,
    cursor: Rc<Cell<Option<f64>>>,
    renderer: Rc<dyn ChartRenderer>,
}

impl TimeProbeSynchronizer {
    /// Wire the probe session: lookup-table link, model-change handling, and
    /// cursor bookkeeping.
    pub fn connect(
        pipeline: &Rc<dyn FloatImagePipeline>,
        bridge: &Rc<ChartDataBridge>,
        lookup_tables: &Rc<dyn LookupTableManager>,
        host: &Rc<dyn Host>,
        renderer: &Rc<dyn ChartRenderer>,
        descriptor: &Descriptor,
    ) -> ViewerResult<Self> {
        let lut_link = LookupTableLink::connect(lookup_tables, pipeline, descriptor)?;

        let cursor = Rc::new(Cell::new(None::<f64>));
        {
            let bridge = Rc::clone(bridge);
            let host = Rc::clone(host);
            let cursor = Rc::clone(&cursor);
            pipeline.on_model_change(Box::new(move |change| {
                tracing::debug!("probe model changed, refreshing synthetic chart");
                let mut data = change.data.clone();
                bridge.update_data(&mut data);
                if let Some(position) = cursor.get() {
                    bridge.set_marker_location(position);
                }
                host.request_refresh();
            }));
        }

        Ok(Self {
            bridge: Rc::clone(bridge),
            lut_link,
            cursor,
            renderer: Rc::clone(renderer),
        })
    }

    /// Record a cursor move along the time axis and forward it to the chart.
    ///
    /// The position is remembered so later data refreshes keep the marker and
    /// hover state consistent without a new cursor event.
    pub fn set_cursor(&self, normalized: f64) {
        self.cursor.set(Some(normalized));
        self.bridge.set_marker_location(normalized);
    }

    /// Last cursor position seen, if any.
    pub fn cursor(&self) -> Option<f64> {
        self.cursor.get()
    }

    /// Overlay-window resize hook: the chart re-measures itself.
    pub fn resize(&self) {
        self.renderer.update_dimensions();
    }

    /// Name of the image layer this session colors.
    pub fn layer(&self) -> &str {
        self.lut_link.layer()
    }
}
