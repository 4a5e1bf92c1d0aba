use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use super::auth_context;
use crate::models::*;
use crate::services::TransactionService;

#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transaction",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction list"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_transactions(
    transaction_service: web::Data<TransactionService>,
    req: HttpRequest,
    query: web::Query<TransactionQuery>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match transaction_service.list(ctx.business_id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transaction",
    request_body = CheckoutRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Invalid cart"),
        (status = 404, description = "No invoice scheme for the location")
    )
)]
pub async fn create_transaction(
    transaction_service: web::Data<TransactionService>,
    req: HttpRequest,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match transaction_service
        .checkout(ctx.business_id, request.into_inner())
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
    get,
    path = "/transactions/{id}",
    tag = "transaction",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction detail", body = TransactionResponse),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    transaction_service: web::Data<TransactionService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match transaction_service
        .get(ctx.business_id, path.into_inner())
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
    path = "/transactions/{id}",
    tag = "transaction",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn delete_transaction(
    transaction_service: web::Data<TransactionService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match transaction_service
        .delete(ctx.business_id, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/transactions/{id}/items",
    tag = "transaction",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction line items"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction_items(
    transaction_service: web::Data<TransactionService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match transaction_service
        .get_items(ctx.business_id, path.into_inner())
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
    put,
    path = "/transactions/{id}/items",
    tag = "transaction",
    request_body = ReplaceItemsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Lines replaced", body = TransactionResponse),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn replace_transaction_items(
    transaction_service: web::Data<TransactionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<ReplaceItemsRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match transaction_service
        .replace_items(ctx.business_id, path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn transaction_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::get().to(list_transactions))
            .route("", web::post().to(create_transaction))
            .route("/{id}", web::get().to(get_transaction))
            .route("/{id}", web::delete().to(delete_transaction))
            .route("/{id}/items", web::get().to(get_transaction_items))
            .route("/{id}/items", web::put().to(replace_transaction_items)),
    );
}
