/// Logging port. Implemented by the infrastructure layer so the domain
/// stays free of any concrete logging backend.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
