use metrics_exporter_prometheus::PrometheusHandle;
use scrape_crm::config::ScraperConfig;
use scrape_crm::workflows::dispatch::CountyRegistry;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) scraper: Arc<ScraperConfig>,
    pub(crate) counties: Arc<CountyRegistry>,
}
