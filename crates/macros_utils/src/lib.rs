//! Small macros shared by the actix-web applications.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web;

/// Generates a `routes` function registering handlers with a
/// `ServiceConfig`.
///
/// `route name` registers a handler declared with one of actix-web's route
/// attributes, `module name` delegates to `name::routes`.
///
/// ```ignore
/// macros_utils::routes! {
///     route health_route,
///     module users,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    ($($kind:ident $item:ident),* $(,)?) => {
        pub fn routes(cfg: &mut $crate::actix_web::web::ServiceConfig) {
            $($crate::routes!(@register cfg, $kind $item);)*
        }
    };
    (@register $cfg:ident, route $item:ident) => {
        $cfg.service($item);
    };
    (@register $cfg:ident, module $item:ident) => {
        $cfg.configure($item::routes);
    };
}
