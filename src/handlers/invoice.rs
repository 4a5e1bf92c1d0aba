use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use super::auth_context;
use crate::models::*;
use crate::services::InvoiceService;

#[utoipa::path(
    get,
    path = "/invoice-number",
    tag = "invoice",
    params(("location_id" = i64, Query, description = "Business location")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Next invoice number", body = InvoiceNumberResponse),
        (status = 404, description = "No scheme bound to the location")
    )
)]
pub async fn peek_invoice_number(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    query: web::Query<InvoiceQuery>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match invoice_service
        .peek(ctx.business_id, query.location_id)
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
    post,
    path = "/invoice-number",
    tag = "invoice",
    request_body = ReserveInvoiceRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Invoice number reserved", body = InvoiceNumberResponse),
        (status = 404, description = "No scheme bound to the location")
    )
)]
pub async fn reserve_invoice_number(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    request: web::Json<ReserveInvoiceRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match invoice_service
        .reserve(ctx.business_id, request.location_id)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn invoice_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoice-number")
            .route("", web::get().to(peek_invoice_number))
            .route("", web::post().to(reserve_invoice_number)),
    );
}
