/**
 * Authenticated Routes
 *
 * Every route here is wrapped by [`auth_middleware`] through `route_layer`,
 * so the check runs only for requests that matched one of these routes and
 * the `{memberId}` path parameter is already available to it.
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::middleware::auth_middleware;
use crate::backend::resources::{
    create_workout, gym_membership, list_workouts, members_metrics, record_metrics,
    set_gym_membership, update_user_info, user_data_and_metrics,
};
use crate::backend::server::state::AppState;

/// Add the member-scoped routes to `router`
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `state` - State the auth middleware reads the store from
pub fn configure_member_routes(router: Router<AppState>, state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/userDataAndMetrics/{memberId}", get(user_data_and_metrics))
        .route("/updateUserInfo/{memberId}", post(update_user_info))
        .route(
            "/membersMetrics/{memberId}",
            get(members_metrics).post(record_metrics),
        )
        .route("/workouts/{memberId}", get(list_workouts))
        .route("/createWorkout/{memberId}", post(create_workout))
        .route("/setGymMembership", post(set_gym_membership))
        .route("/setGymMembership/{memberId}", post(set_gym_membership))
        .route("/gymMembership/{memberId}", get(gym_membership))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    router.merge(protected)
}
