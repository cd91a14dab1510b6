use std::rc::Rc;

use crate::{
    chart::bridge::{ChartDataBridge, ChartPainter},
    descriptor::capability::{CapabilitySet, PipelineKind},
    descriptor::model::Descriptor,
    foundation::core::TIME_DIMENSION,
    foundation::error::{ViewerError, ViewerResult},
    palette,
    probe::lut::LookupTableManager,
    probe::sync::{FloatImagePipeline, TimeProbeSynchronizer},
    query::{QueryDataModel, QueryDataModelFactory},
    viewer::host::{ChartRenderer, DescriptorFetcher, Host, MountKind, OverlayConfig, ViewMount},
};

/// Alert shown when the descriptor's capability set cannot be served.
pub const UNSUPPORTED_FORMAT_ALERT: &str = "The metadata format seems to be unsupported.";

/// Alert shown when the descriptor cannot be downloaded or parsed.
pub fn download_failure_alert(url: &str) -> String {
    format!("Unable to download metadata at {url}")
}

/// Default base path handed to the query data model factory.
pub const DEFAULT_DATA_BASE_PATH: &str = "/data/";

/// Externally built composite image pipeline.
pub trait CompositeImagePipeline {
    /// Trigger a (re)build of the composited image.
    fn update(&self);
}

/// Constructs the image pipelines the specialized viewers run on.
pub trait ImagePipelineFactory {
    /// Time-aware float-image pipeline for the probe viewer.
    fn float_image(&self, model: Rc<dyn QueryDataModel>) -> Rc<dyn FloatImagePipeline>;

    /// Composite-image pipeline for the composite viewer.
    fn composite(&self, model: Rc<dyn QueryDataModel>) -> Rc<dyn CompositeImagePipeline>;
}

/// Everything the resolver needs from the embedding application.
pub struct ViewerEnv {
    pub host: Rc<dyn Host>,
    pub fetcher: Rc<dyn DescriptorFetcher>,
    pub models: Rc<dyn QueryDataModelFactory>,
    pub images: Rc<dyn ImagePipelineFactory>,
    pub lookup_tables: Rc<dyn LookupTableManager>,
    pub chart: Rc<dyn ChartRenderer>,
    pub data_base_path: String,
}

impl ViewerEnv {
    pub fn new(
        host: Rc<dyn Host>,
        fetcher: Rc<dyn DescriptorFetcher>,
        models: Rc<dyn QueryDataModelFactory>,
        images: Rc<dyn ImagePipelineFactory>,
        lookup_tables: Rc<dyn LookupTableManager>,
        chart: Rc<dyn ChartRenderer>,
    ) -> Self {
        Self {
            host,
            fetcher,
            models,
            images,
            lookup_tables,
            chart,
            data_base_path: DEFAULT_DATA_BASE_PATH.to_string(),
        }
    }
}

/// A live probe session: the wired bridge, synchronizer, and pipeline.
///
/// Dropping the session drops the wiring; the embedding application keeps it
/// alive for the viewer's lifetime.
pub struct ProbeSession {
    pub synchronizer: TimeProbeSynchronizer,
    pub bridge: Rc<ChartDataBridge>,
    pub pipeline: Rc<dyn FloatImagePipeline>,
}

/// Outcome of a successful resolution.
pub struct ResolvedViewer {
    /// The query data model owned by this viewer instance.
    pub model: Rc<dyn QueryDataModel>,
    /// Which pipelines actually mounted, in activation order.
    pub mounted: Vec<MountKind>,
    /// Live probe sessions (one per probe mount).
    pub probes: Vec<ProbeSession>,
}

impl std::fmt::Debug for ResolvedViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedViewer")
            .field("mounted", &self.mounted)
            .field("probes", &self.probes.len())
            .finish_non_exhaustive()
    }
}

/// Resolve a parsed descriptor into mounted viewer pipelines.
///
/// The background-color hint is applied to the host before anything mounts.
/// Capability tags are parsed once; each selected pipeline activates
/// independently. Activation preconditions (base tag, probe layer and time
/// guards) fail fast; a host that refuses a mount only skips that pipeline.
#[tracing::instrument(skip(descriptor, env))]
pub fn resolve(descriptor: &Descriptor, env: &ViewerEnv) -> ViewerResult<ResolvedViewer> {
    if let Some(background) = descriptor.background_color() {
        env.host.set_background(background);
    }

    let capabilities = CapabilitySet::parse(&descriptor.tags);
    let selected = capabilities.select_pipelines()?;
    tracing::debug!(?selected, "resolved viewer pipelines");

    let model = env.models.create(descriptor, &env.data_base_path);

    let mut mounted = Vec::new();
    let mut probes = Vec::new();
    for kind in selected {
        match kind {
            PipelineKind::Plain => {
                model.fetch_data();
                if mount_or_warn(env, ViewMount::Image {
                    model: Rc::clone(&model),
                }) {
                    mounted.push(MountKind::Image);
                }
            }
            PipelineKind::Probe => {
                if let Some(session) = activate_probe(descriptor, &model, env)? {
                    mounted.push(MountKind::Probe);
                    probes.push(session);
                }
            }
            PipelineKind::Composite => {
                let pipeline = env.images.composite(Rc::clone(&model));
                pipeline.update();
                if mount_or_warn(env, ViewMount::Composite {
                    model: Rc::clone(&model),
                }) {
                    mounted.push(MountKind::Composite);
                }
            }
        }
    }

    Ok(ResolvedViewer {
        model,
        mounted,
        probes,
    })
}

/// Activate the probe pipeline, or fail fast on a violated precondition.
///
/// Returns `Ok(None)` when the host refused the mount (container gone).
fn activate_probe(
    descriptor: &Descriptor,
    model: &Rc<dyn QueryDataModel>,
    env: &ViewerEnv,
) -> ViewerResult<Option<ProbeSession>> {
    descriptor.probe_layer()?;

    let time_size = model.get_size(TIME_DIMENSION).unwrap_or(0);
    if time_size < 2 {
        return Err(ViewerError::validation(format!(
            "probe pipeline requires a time dimension with at least 2 steps, found {time_size}"
        )));
    }

    let colors = palette::select(descriptor.probe_palette());

    for argument in &descriptor.arguments_active {
        model.set_animation_flag(argument, true);
    }

    let bridge = Rc::new(ChartDataBridge::new(Rc::clone(model), colors));
    let pipeline = env.images.float_image(Rc::clone(model));
    let synchronizer = TimeProbeSynchronizer::connect(
        &pipeline,
        &bridge,
        &env.lookup_tables,
        &env.host,
        &env.chart,
        descriptor,
    )?;

    env.chart
        .attach(Rc::clone(&bridge) as Rc<dyn ChartPainter>);

    let mount = ViewMount::Probe {
        model: Rc::clone(model),
        chart: Rc::clone(&bridge) as Rc<dyn ChartPainter>,
        overlay: OverlayConfig::default(),
        initial_state: descriptor.initial_state.clone(),
        allow_magic_lens: false,
        probe: true,
    };
    if !mount_or_warn(env, mount) {
        return Ok(None);
    }

    // First build lands after the UI tree has mounted.
    let deferred = Rc::clone(&pipeline);
    env.host.defer(Box::new(move || deferred.update()));

    Ok(Some(ProbeSession {
        synchronizer,
        bridge,
        pipeline,
    }))
}

fn mount_or_warn(env: &ViewerEnv, view: ViewMount) -> bool {
    let kind = view.kind();
    match env.host.mount(view) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%err, ?kind, "host refused mount, skipping pipeline");
            false
        }
    }
}

/// Fetch a descriptor and resolve it into the host.
///
/// Failures surface as blocking alerts: download/parse problems with the
/// download message, anything descriptor-level with the unsupported-format
/// message. On success the resolved viewer is handed to `on_resolved`, which
/// owns it for the rest of the page's lifetime.
pub fn load(url: &str, env: Rc<ViewerEnv>, on_resolved: Box<dyn FnOnce(ResolvedViewer)>) {
    let url_for_callback = url.to_string();
    let fetcher = Rc::clone(&env.fetcher);
    fetcher.fetch(
        url,
        Box::new(move |result| {
            let body = match result {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(%err, url = %url_for_callback, "descriptor fetch failed");
                    env.host.alert(&download_failure_alert(&url_for_callback));
                    return;
                }
            };

            let descriptor = match Descriptor::from_value(body) {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    tracing::warn!(%err, url = %url_for_callback, "descriptor body is not valid");
                    env.host.alert(&download_failure_alert(&url_for_callback));
                    return;
                }
            };

            match resolve(&descriptor, &env) {
                Ok(viewer) => on_resolved(viewer),
                Err(err) => {
                    tracing::warn!(%err, "viewer resolution failed");
                    env.host.alert(UNSUPPORTED_FORMAT_ALERT);
                }
            }
        }),
    );
}
