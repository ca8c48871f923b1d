use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Routes the domain's logging port onto the `tracing` backbone.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "storefront", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "storefront", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "storefront", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "storefront", "{}", message);
    }
}
