use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use super::auth_context;
use crate::models::*;
use crate::services::OrderAreaService;

#[utoipa::path(
    get,
    path = "/order-areas",
    tag = "order-area",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order area list"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_order_areas(
    order_area_service: web::Data<OrderAreaService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match order_area_service.list(ctx.business_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/order-areas",
    tag = "order-area",
    request_body = CreateOrderAreaRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order area created", body = OrderArea),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_order_area(
    order_area_service: web::Data<OrderAreaService>,
    req: HttpRequest,
    request: web::Json<CreateOrderAreaRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match order_area_service
        .create(ctx.business_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/order-areas/{id}",
    tag = "order-area",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order area deleted"),
        (status = 404, description = "Order area not found")
    )
)]
pub async fn delete_order_area(
    order_area_service: web::Data<OrderAreaService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match order_area_service
        .delete(ctx.business_id, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_area_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/order-areas")
            .route("", web::get().to(list_order_areas))
            .route("", web::post().to(create_order_area))
            .route("/{id}", web::delete().to(delete_order_area)),
    );
}
