use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use super::auth_context;
use crate::models::*;
use crate::services::RecipeService;

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipe",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recipe list with ingredient costs"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_recipes(
    recipe_service: web::Data<RecipeService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match recipe_service.list(ctx.business_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipe",
    request_body = CreateRecipeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_recipe(
    recipe_service: web::Data<RecipeService>,
    req: HttpRequest,
    request: web::Json<CreateRecipeRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match recipe_service
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
    get,
    path = "/recipes/{id}",
    tag = "recipe",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeResponse),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(
    recipe_service: web::Data<RecipeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match recipe_service.get(ctx.business_id, path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipe",
    request_body = UpdateRecipeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn update_recipe(
    recipe_service: web::Data<RecipeService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateRecipeRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match recipe_service
        .update(ctx.business_id, path.into_inner(), request.into_inner())
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
    path = "/recipes/{id}",
    tag = "recipe",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn delete_recipe(
    recipe_service: web::Data<RecipeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match recipe_service
        .delete(ctx.business_id, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn recipe_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recipes")
            .route("", web::get().to(list_recipes))
            .route("", web::post().to(create_recipe))
            .route("/{id}", web::get().to(get_recipe))
            .route("/{id}", web::put().to(update_recipe))
            .route("/{id}", web::delete().to(delete_recipe)),
    );
}
