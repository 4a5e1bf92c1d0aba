use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;
use crate::pos::{Allocation, Bill, OrderItem, Table, TableOrder, TableStatus};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::product::list_products,
        handlers::product::create_product,
        handlers::product::get_product,
        handlers::product::update_product,
        handlers::product::delete_product,
        handlers::product::list_combos,
        handlers::transaction::list_transactions,
        handlers::transaction::create_transaction,
        handlers::transaction::get_transaction,
        handlers::transaction::delete_transaction,
        handlers::transaction::get_transaction_items,
        handlers::transaction::replace_transaction_items,
        handlers::invoice::peek_invoice_number,
        handlers::invoice::reserve_invoice_number,
        handlers::recipe::list_recipes,
        handlers::recipe::create_recipe,
        handlers::recipe::get_recipe,
        handlers::recipe::update_recipe,
        handlers::recipe::delete_recipe,
        handlers::order_area::list_order_areas,
        handlers::order_area::create_order_area,
        handlers::order_area::delete_order_area,
        handlers::table::list_tables,
        handlers::table::upsert_table,
        handlers::table::remove_table,
        handlers::table::update_table_status,
        handlers::table::add_order_items,
        handlers::table::mark_printed,
        handlers::table::clear_order,
        handlers::table::enable_split,
        handlers::table::get_split,
        handlers::table::add_participant,
        handlers::table::remove_participant,
        handlers::table::assign_item,
        handlers::table::pay_bill,
    ),
    components(
        schemas(
            LoginRequest,
            AuthResponse,
            UserResponse,
            Product,
            Variation,
            ProductResponse,
            CreateProductRequest,
            UpdateProductRequest,
            CheckoutItem,
            CheckoutRequest,
            ReplaceItemsRequest,
            Transaction,
            TransactionLine,
            TransactionResponse,
            InvoiceScheme,
            InvoiceNumberResponse,
            ReserveInvoiceRequest,
            Recipe,
            IngredientInput,
            IngredientResponse,
            CreateRecipeRequest,
            UpdateRecipeRequest,
            RecipeResponse,
            OrderArea,
            CreateOrderAreaRequest,
            CreateTableRequest,
            UpdateTableStatusRequest,
            OrderItemInput,
            AddOrderItemsRequest,
            PrintAreasRequest,
            AddParticipantRequest,
            AssignItemRequest,
            Table,
            TableStatus,
            TableOrder,
            OrderItem,
            Bill,
            Allocation,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "product", description = "Product and combo catalog API"),
        (name = "transaction", description = "Checkout and sales API"),
        (name = "invoice", description = "Invoice numbering API"),
        (name = "recipe", description = "Recipe costing API"),
        (name = "order-area", description = "Preparation area API"),
        (name = "table", description = "Restaurant floor plan API"),
        (name = "split", description = "Split-bill API"),
    ),
    info(
        title = "Mesero Backend API",
        version = "1.0.0",
        description = "Restaurant point-of-sale REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
