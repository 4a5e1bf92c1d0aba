use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use super::auth_context;
use crate::models::*;
use crate::services::TableService;

#[utoipa::path(
    get,
    path = "/res-tables",
    tag = "table",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Floor plan for the tenant"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_tables(
    table_service: web::Data<TableService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    let tables = table_service.list_tables(ctx.business_id).await;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": tables
    })))
}

#[utoipa::path(
    post,
    path = "/res-tables",
    tag = "table",
    request_body = CreateTableRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Table created or replaced"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upsert_table(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    request: web::Json<CreateTableRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    let table = table_service
        .upsert_table(ctx.business_id, request.into_inner())
        .await;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": table
    })))
}

#[utoipa::path(
    delete,
    path = "/res-tables/{id}",
    tag = "table",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Table removed"),
        (status = 404, description = "Table not found")
    )
)]
pub async fn remove_table(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .remove_table(ctx.business_id, &path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/res-tables/{id}/status",
    tag = "table",
    request_body = UpdateTableStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status updated"),
        (status = 404, description = "Table not found")
    )
)]
pub async fn update_table_status(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateTableStatusRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .set_status(ctx.business_id, &path.into_inner(), request.status)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/res-tables/{id}/items",
    tag = "table",
    request_body = AddOrderItemsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Items appended, updated order returned"),
        (status = 404, description = "Table not found")
    )
)]
pub async fn add_order_items(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<AddOrderItemsRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .add_items(ctx.business_id, &path.into_inner(), request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/res-tables/{id}/print",
    tag = "table",
    request_body = PrintAreasRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Areas recorded as printed"),
        (status = 400, description = "Table has no open order")
    )
)]
pub async fn mark_printed(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<PrintAreasRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .mark_printed(
            ctx.business_id,
            &path.into_inner(),
            request.into_inner().areas,
        )
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/res-tables/{id}/order",
    tag = "table",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order cleared, table freed"),
        (status = 404, description = "Table not found")
    )
)]
pub async fn clear_order(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .clear_order(ctx.business_id, &path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/res-tables/{id}/split",
    tag = "split",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Split session opened (idempotent)"),
        (status = 400, description = "Table has no open order")
    )
)]
pub async fn enable_split(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .enable_split(ctx.business_id, &path.into_inner())
        .await
    {
        Ok(bills) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bills
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/res-tables/{id}/split/participants",
    tag = "split",
    request_body = AddParticipantRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Participant added"),
        (status = 400, description = "No split session on the table")
    )
)]
pub async fn add_participant(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<AddParticipantRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .add_participant(ctx.business_id, &path.into_inner(), &request.name)
        .await
    {
        Ok(bills) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bills
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/res-tables/{id}/split/participants/{bill_id}",
    tag = "split",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Participant removed"),
        (status = 404, description = "Participant not found")
    )
)]
pub async fn remove_participant(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    let (table_id, bill_id) = path.into_inner();
    match table_service
        .remove_participant(ctx.business_id, &table_id, &bill_id)
        .await
    {
        Ok(bills) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bills
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/res-tables/{id}/split/assign",
    tag = "split",
    request_body = AssignItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item assigned, bills recomputed"),
        (status = 400, description = "Unknown participant"),
        (status = 404, description = "Item not on the table's order")
    )
)]
pub async fn assign_item(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<AssignItemRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .assign_item(ctx.business_id, &path.into_inner(), request.into_inner())
        .await
    {
        Ok(bills) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bills
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/res-tables/{id}/split/participants/{bill_id}/pay",
    tag = "split",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bill marked paid"),
        (status = 404, description = "Participant not found")
    )
)]
pub async fn pay_bill(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    let (table_id, bill_id) = path.into_inner();
    match table_service
        .mark_bill_paid(ctx.business_id, &table_id, &bill_id)
        .await
    {
        Ok(bills) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bills
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/res-tables/{id}/split",
    tag = "split",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current bills, as allocated"),
        (status = 400, description = "No split session on the table")
    )
)]
pub async fn get_split(
    table_service: web::Data<TableService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match table_service
        .finalize_split(ctx.business_id, &path.into_inner())
        .await
    {
        Ok(bills) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bills
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn table_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/res-tables")
            .route("", web::get().to(list_tables))
            .route("", web::post().to(upsert_table))
            .route("/{id}", web::delete().to(remove_table))
            .route("/{id}/status", web::put().to(update_table_status))
            .route("/{id}/items", web::post().to(add_order_items))
            .route("/{id}/print", web::post().to(mark_printed))
            .route("/{id}/order", web::delete().to(clear_order))
            .route("/{id}/split", web::post().to(enable_split))
            .route("/{id}/split", web::get().to(get_split))
            .route("/{id}/split/assign", web::post().to(assign_item))
            .route("/{id}/split/participants", web::post().to(add_participant))
            .route(
                "/{id}/split/participants/{bill_id}",
                web::delete().to(remove_participant),
            )
            .route(
                "/{id}/split/participants/{bill_id}/pay",
                web::post().to(pay_bill),
            ),
    );
}
