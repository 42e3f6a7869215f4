use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/olimpiads", olimpiad_routes())
        .nest("/features", feature_routes())
        .routes(routes!(handlers::health::health))
}

fn olimpiad_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::olimpiad::list_olimpiads,
            handlers::olimpiad::create_olimpiad
        ))
        .routes(routes!(
            handlers::olimpiad::get_olimpiad,
            handlers::olimpiad::update_olimpiad,
            handlers::olimpiad::delete_olimpiad
        ))
        .routes(routes!(handlers::olimpiad::add_olimpiad_date))
        .routes(routes!(handlers::olimpiad::set_olimpiad_feature))
}

fn feature_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::feature::list_features,
            handlers::feature::create_feature
        ))
        .routes(routes!(handlers::feature::delete_feature))
}
