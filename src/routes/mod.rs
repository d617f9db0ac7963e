use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{adventure_types, auth, bookings, bookmarks, gems, states, vehicles};
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::user_rate_limit::create_user_governor;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Per-user governor for authenticated routes, IP-based for public ones
    let user_governor = create_user_governor();
    let public_governor = create_public_governor();

    // Public routes (rate limited per IP)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor.clone());

    // Public catalogue routes (vehicles, gems, states, adventure types)
    let public_routes = Router::new()
        .route("/vehicles", get(vehicles::list_vehicles))
        .route("/vehicles/available", get(vehicles::list_available_vehicles))
        .route("/vehicles/nearby", get(vehicles::nearby_vehicles))
        .route("/vehicles/{id}", get(vehicles::get_vehicle))
        .route("/hidden-gems", get(gems::list_gems))
        .route("/hidden-gems/search", get(gems::search_gems))
        .route("/hidden-gems/nearby", get(gems::nearby_gems))
        .route("/hidden-gems/stats", get(gems::gem_stats))
        .route(
            "/hidden-gems/by-adventure-types",
            get(gems::gems_by_adventure_types),
        )
        .route("/hidden-gems/{id}", get(gems::get_gem))
        .route(
            "/hidden-gems/{id}/bookmarks/count",
            get(bookmarks::gem_bookmark_count),
        )
        .route("/states", get(states::list_states))
        .route("/states/search", get(states::search_states))
        .route("/states/{id}", get(states::get_state))
        .route("/states/{id}/hidden-gems", get(gems::gems_by_state))
        .route("/adventure-types", get(adventure_types::list_adventure_types))
        .route(
            "/adventure-types/search",
            get(adventure_types::search_adventure_types),
        )
        .route("/adventure-types/{id}", get(adventure_types::get_adventure_type))
        .layer(public_governor);

    // Booking routes (requires auth; rate limited per user)
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/", get(bookings::my_bookings))
        .route("/check-availability", get(bookings::check_availability))
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}", delete(bookings::cancel_booking))
        .layer(user_governor.clone())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Bookmark routes (requires auth; rate limited per user)
    let bookmark_routes = Router::new()
        .route("/", get(bookmarks::list_bookmarks))
        .route("/count", get(bookmarks::bookmark_count))
        .route("/check/{gem_id}", get(bookmarks::check_bookmark))
        .route("/toggle/{gem_id}", post(bookmarks::toggle_bookmark))
        .route("/{gem_id}", post(bookmarks::add_bookmark))
        .route("/{gem_id}", delete(bookmarks::remove_bookmark))
        .layer(user_governor)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        // Vehicle management
        .route("/vehicles", post(vehicles::create_vehicle))
        .route("/vehicles/{id}", put(vehicles::update_vehicle))
        .route(
            "/vehicles/{id}/availability",
            patch(vehicles::update_vehicle_availability),
        )
        .route("/vehicles/{id}", delete(vehicles::delete_vehicle))
        // Hidden gem management
        .route("/hidden-gems", post(gems::create_gem))
        .route("/hidden-gems/{id}", put(gems::update_gem))
        .route("/hidden-gems/{id}", delete(gems::delete_gem))
        // State management
        .route("/states", post(states::create_state))
        .route("/states/{id}", put(states::update_state))
        .route("/states/{id}", delete(states::delete_state))
        // Adventure type management
        .route("/adventure-types", post(adventure_types::create_adventure_type))
        .route("/adventure-types/{id}", put(adventure_types::update_adventure_type))
        .route(
            "/adventure-types/{id}",
            delete(adventure_types::delete_adventure_type),
        )
        // Booking management
        .route("/bookings", get(bookings::list_all_bookings))
        .route("/bookings/{id}/status", patch(bookings::update_booking_status))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/users/bookmarks", bookmark_routes)
        .nest("/api/admin", admin_routes)
        .with_state(state)
}
