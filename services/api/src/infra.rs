use lead_dork::store::SearchLog;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) store: Arc<dyn SearchLog>,
    pub(crate) ui_path: Arc<PathBuf>,
    pub(crate) shutdown: Arc<Notify>,
}

impl AppState {
    pub(crate) fn new(
        metrics: PrometheusHandle,
        store: Arc<dyn SearchLog>,
        ui_path: PathBuf,
    ) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            store,
            ui_path: Arc::new(ui_path),
            shutdown: Arc::new(Notify::new()),
        }
    }
}
