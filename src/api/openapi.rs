use crate::api::handlers::{admin, auth, feedback, health, watchlist};
use utoipa::openapi::{
    security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    InfoBuilder, License, OpenApiBuilder, Tag,
};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` spec.
/// Routes added outside (like `/` and the static uploads mount) are
/// intentionally not documented.
pub(crate) fn api_router() -> OpenApiRouter {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::signup::signup_request))
        .routes(routes!(auth::signup::verify_signup_otp))
        .routes(routes!(auth::login::login))
        .routes(routes!(auth::profile::get_profile))
        .routes(routes!(auth::profile::update_profile))
        .routes(routes!(auth::reset::forgot_password))
        .routes(routes!(auth::reset::reset_password))
        .routes(routes!(auth::upload::upload_profile_pic))
        .routes(routes!(
            watchlist::add_to_watchlist,
            watchlist::get_watchlist
        ))
        .routes(routes!(watchlist::remove_from_watchlist))
        .routes(routes!(feedback::submit_feedback))
        .routes(routes!(admin::admin_stats))
        .routes(routes!(admin::admin_feedbacks))
        .routes(routes!(admin::admin_user_detail));

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Account lifecycle and sessions".to_string());
    let mut watchlist_tag = Tag::new("watchlist");
    watchlist_tag.description = Some("Per-account movie watchlists".to_string());
    let mut feedback_tag = Tag::new("feedback");
    feedback_tag.description = Some("Public feedback intake".to_string());
    let mut admin_tag = Tag::new("admin");
    admin_tag.description = Some("Admin-only reporting".to_string());
    let spec = router.get_openapi_mut();
    spec.tags = Some(vec![auth_tag, watchlist_tag, feedback_tag, admin_tag]);
    spec.components
        .get_or_insert_with(Default::default)
        .add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.license = cargo_license();

    OpenApiBuilder::new().info(info).build()
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_all_paths() {
        let spec = openapi();
        let paths = &spec.paths.paths;
        for expected in [
            "/health",
            "/auth/signup-request",
            "/auth/verify-signup-otp",
            "/auth/login",
            "/auth/me",
            "/auth/update",
            "/auth/forgot-password",
            "/auth/reset-password",
            "/auth/upload-dp",
            "/watchlist",
            "/watchlist/{movie_id}",
            "/feedback",
            "/admin/stats",
            "/admin/feedbacks",
            "/admin/user/{id}",
        ] {
            assert!(paths.contains_key(expected), "missing path {expected}");
        }
    }

    #[test]
    fn openapi_uses_cargo_metadata() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
    }
}
