use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{MethodRouter, delete, get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use lyceum_core::health::{healthz, readyz};
use lyceum_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::config::AdminConfig;
use crate::handlers::{
    auth::{login, logout, refresh, verify},
    guardian::{create_guardian_relation, deactivate_guardian_relation, list_student_guardians},
    membership::{create_membership, expire_membership, get_membership, list_user_memberships},
    menu::menu,
    role::{grant_role, list_permissions, list_roles, revoke_role},
    school::{create_school, delete_school, get_school, list_schools, update_school},
    stats::platform_stats,
    subject::{create_subject, delete_subject, get_subject, list_subjects, update_subject},
    unit::{
        create_unit, delete_unit, get_unit, hierarchy_path, list_units, restore_unit, unit_tree,
        update_unit,
    },
    user::{create_user, delete_user, get_user, list_users, update_user},
};
use crate::middleware::{require_auth, require_permission};
use crate::state::AppState;

/// Wrap a method router in the permission gate.
fn guarded(permission: &'static str, routes: MethodRouter<AppState>) -> MethodRouter<AppState> {
    routes.layer(middleware::from_fn(move |req, next| {
        require_permission(permission, req, next)
    }))
}

fn cors_layer(config: &AdminConfig) -> CorsLayer {
    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn build_router(state: AppState, config: &AdminConfig) -> Router {
    let public = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/verify", post(verify));

    let protected = Router::new()
        // Auth
        .route("/api/v1/auth/logout", post(logout))
        // Menu
        .route("/api/v1/menu", get(menu))
        // Schools
        .route(
            "/api/v1/schools",
            guarded("schools:create", post(create_school))
                .merge(guarded("schools:read", get(list_schools))),
        )
        .route(
            "/api/v1/schools/{id}",
            guarded("schools:read", get(get_school))
                .merge(guarded("schools:update", put(update_school)))
                .merge(guarded("schools:delete", delete(delete_school))),
        )
        // Academic units
        .route(
            "/api/v1/schools/{id}/units",
            guarded("units:create", post(create_unit))
                .merge(guarded("units:read", get(list_units))),
        )
        .route(
            "/api/v1/schools/{id}/units/tree",
            guarded("units:read", get(unit_tree)),
        )
        .route(
            "/api/v1/units/{id}",
            guarded("units:read", get(get_unit))
                .merge(guarded("units:update", put(update_unit)))
                .merge(guarded("units:delete", delete(delete_unit))),
        )
        .route(
            "/api/v1/units/{id}/hierarchy-path",
            guarded("units:read", get(hierarchy_path)),
        )
        .route(
            "/api/v1/units/{id}/restore",
            guarded("units:update", post(restore_unit)),
        )
        // Users
        .route(
            "/api/v1/users",
            guarded("users:create", post(create_user))
                .merge(guarded("users:read", get(list_users))),
        )
        .route(
            "/api/v1/users/{id}",
            guarded("users:read", get(get_user))
                .merge(guarded("users:update", put(update_user)))
                .merge(guarded("users:delete", delete(delete_user))),
        )
        // Role grants
        .route(
            "/api/v1/users/{id}/roles",
            guarded("users:update", post(grant_role)),
        )
        .route(
            "/api/v1/user-roles/{id}",
            guarded("users:update", delete(revoke_role)),
        )
        // Catalog
        .route("/api/v1/roles", guarded("roles:read", get(list_roles)))
        .route(
            "/api/v1/permissions",
            guarded("roles:read", get(list_permissions)),
        )
        // Subjects
        .route(
            "/api/v1/schools/{id}/subjects",
            guarded("subjects:create", post(create_subject))
                .merge(guarded("subjects:read", get(list_subjects))),
        )
        .route(
            "/api/v1/subjects/{id}",
            guarded("subjects:read", get(get_subject))
                .merge(guarded("subjects:update", put(update_subject)))
                .merge(guarded("subjects:delete", delete(delete_subject))),
        )
        // Memberships
        .route(
            "/api/v1/memberships",
            guarded("memberships:create", post(create_membership)),
        )
        .route(
            "/api/v1/memberships/{id}",
            guarded("memberships:read", get(get_membership)),
        )
        .route(
            "/api/v1/memberships/{id}/expire",
            guarded("memberships:update", post(expire_membership)),
        )
        .route(
            "/api/v1/users/{id}/memberships",
            guarded("memberships:read", get(list_user_memberships)),
        )
        // Guardian relations
        .route(
            "/api/v1/guardians",
            guarded("guardians:create", post(create_guardian_relation)),
        )
        .route(
            "/api/v1/guardians/{id}",
            guarded("guardians:delete", delete(deactivate_guardian_relation)),
        )
        .route(
            "/api/v1/students/{id}/guardians",
            guarded("guardians:read", get(list_student_guardians)),
        )
        // Stats
        .route("/api/v1/stats", guarded("stats:read", get(platform_stats)))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public
        .merge(protected)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_deadline(),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .layer(cors_layer(config))
        .with_state(state)
}
