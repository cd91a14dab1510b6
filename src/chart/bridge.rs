use std::{cell::RefCell, rc::Rc};

use crate::{
    chart::trace::{
        ChartUpdate, HoverEntry, HoverState, ProbeData, Trace, assign_missing_colors, build_traces,
    },
    foundation::core::{NormalizedPosition, TIME_DIMENSION},
    foundation::slot::CallbackSlot,
    palette::Palette,
    query::QueryDataModel,
};

/// Painter-shaped contract expected by the generic chart/render plumbing.
///
/// Real painters draw into a surface when the render loop asks; the chart
/// data bridge satisfies this shape with stubs and repurposes the data-push
/// hook as its sole delivery channel.
pub trait ChartPainter {
    fn is_ready(&self) -> bool;
    fn paint(&self);
    fn set_background_color(&self, css_color: &str);
    /// Move the time marker to a normalized position in `[0, 1]`.
    fn set_marker_location(&self, normalized: f64);
    /// Register the single data-ready listener (last registration wins).
    fn on_data_ready(&self, listener: Box<dyn FnMut(&ChartUpdate)>);
}

/// Bridges a time-indexed float-image data source to a trace-oriented chart
/// renderer, without exposing the image pipeline's real imaging API.
///
/// Constructed once per probe session. All state lives on the event-loop
/// thread; updates arrive either as full data refreshes ([`Self::update_data`])
/// or as marker moves ([`ChartPainter::set_marker_location`]), and both are
/// pushed out through the single data-ready listener.
pub struct ChartDataBridge {
    model: Rc<dyn QueryDataModel>,
    palette: &'static Palette,
    traces: RefCell<Vec<Trace>>,
    hover_list: RefCell<Vec<HoverEntry>>,
    data_ready: CallbackSlot<ChartUpdate>,
}

impl ChartDataBridge {
    pub fn new(model: Rc<dyn QueryDataModel>, palette: &'static Palette) -> Self {
        Self {
            model,
            palette,
            traces: RefCell::new(Vec::new()),
            hover_list: RefCell::new(Vec::new()),
            data_ready: CallbackSlot::new(),
        }
    }

    /// Palette backing this session's series colors.
    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    /// Refresh the chart from a new probe data frame.
    ///
    /// Assigns a palette color to every field still lacking one (mutating the
    /// caller's fields so colors stay stable across frames), rebuilds the
    /// trace and hover sets, and notifies the listener. A frame without a
    /// field collection degrades to an empty chart.
    pub fn update_data(&self, data: &mut ProbeData) {
        if let Some(fields) = data.fields.as_deref_mut() {
            assign_missing_colors(fields, self.palette);
        }
        let (traces, hover_list) = build_traces(data.fields.as_deref());
        tracing::debug!(traces = traces.len(), "rebuilt probe chart traces");

        *self.traces.borrow_mut() = traces.clone();
        *self.hover_list.borrow_mut() = hover_list.clone();
        self.data_ready.emit(&ChartUpdate::data(traces, hover_list));
    }

    /// Current hover entries (test and diagnostics hook).
    pub fn hover_entries(&self) -> Vec<HoverEntry> {
        self.hover_list.borrow().clone()
    }
}

impl ChartPainter for ChartDataBridge {
    /// Never ready: the generic rendering loop must not paint this adapter
    /// directly. It is a data bridge, not a paintable surface.
    fn is_ready(&self) -> bool {
        false
    }

    fn paint(&self) {}

    /// No-op: chart background is owned by the host container.
    fn set_background_color(&self, _css_color: &str) {}

    fn set_marker_location(&self, normalized: f64) {
        let position = NormalizedPosition::new(normalized);
        // Read the time extent fresh: in-situ datasets grow while running.
        let time_size = self.model.get_size(TIME_DIMENSION).unwrap_or(0);

        if let Some(index) = position.to_time_index(time_size) {
            for entry in self.hover_list.borrow_mut().iter_mut() {
                entry.point_number = Some(index);
            }
        }

        let update = ChartUpdate::marker(
            self.traces.borrow().clone(),
            HoverState {
                enable: true,
                hover_list: self.hover_list.borrow().clone(),
            },
        );
        self.data_ready.emit(&update);
    }

    fn on_data_ready(&self, listener: Box<dyn FnMut(&ChartUpdate)>) {
        self.data_ready.set(listener);
    }
}
