use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (auth, events, rpc, ...) implements this trait
/// to register its API endpoints. The binary entry point collects all
/// modules and nests their routes under `/{name}`.
pub trait Module: Send + Sync {
    /// Module name, used for logging and route prefixes.
    fn name(&self) -> &str;

    /// Return the module's routes, relative to the module prefix.
    fn routes(&self) -> Router;
}
