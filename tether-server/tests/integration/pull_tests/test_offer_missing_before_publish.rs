use axum::http::StatusCode;

use crate::integration::init_tracing;
use super::{call, relay};

#[tokio::test]
async fn test_offer_missing_before_publish() {
    init_tracing();
    let router = relay();

    let response = call(&router, "GET", "/offer", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
