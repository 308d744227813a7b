//! Route configuration for order endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    advance_phase, create_order, delete_order, get_order, health, set_phase, update_order,
    OrderAppState,
};

/// Creates the order router with all endpoints.
///
/// Routes:
/// - `POST /api/orders` - Create an order
/// - `GET /api/orders/:order_id` - Get an order
/// - `PUT /api/orders/:order_id` - Bulk update an order
/// - `DELETE /api/orders/:order_id` - Delete an order
/// - `POST /api/orders/:order_id/advance` - Advance to the next phase
/// - `PUT /api/orders/:order_id/phase` - Jump to a named phase
/// - `GET /health` - Liveness probe
pub fn order_router() -> Router<OrderAppState> {
    Router::new()
        .route("/api/orders", post(create_order))
        .route(
            "/api/orders/:order_id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/api/orders/:order_id/advance", post(advance_phase))
        .route("/api/orders/:order_id/phase", put(set_phase))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAdminActivity, InMemoryCustomerStatistics, InMemoryOrderRepository,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let orders = InMemoryOrderRepository::new();
        let state = OrderAppState::new(
            Arc::new(orders.clone()),
            Arc::new(InMemoryCustomerStatistics::new(orders)),
            Arc::new(InMemoryAdminActivity::new()),
            10,
        );
        order_router().with_state(state)
    }

    fn create_body() -> String {
        serde_json::json!({
            "customer_id": "cust-1",
            "details": {
                "product_name": "Tote bags",
                "quantity": 200,
                "total_amount": 900.0
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn health_responds_ok() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_route_exists() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/orders")
                    .header("content-type", "application/json")
                    .header("X-Admin-Id", "admin-1")
                    .body(Body::from(create_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_requires_admin_header() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/orders")
                    .header("content-type", "application/json")
                    .body(Body::from(create_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_unknown_order_is_not_found() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/orders/ORD-2025-999")
                    .header("X-Admin-Id", "admin-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_order_id_is_bad_request() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/orders/not-an-id/advance")
                    .header("X-Admin-Id", "admin-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/shipments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
