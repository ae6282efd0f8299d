use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(ToSchema)]
#[schema(example = json!({
    "nombre": "Mouse",
    "descripcion": "Mouse inalámbrico",
    "precio": 10.0,
    "stock": 5,
    "categoria": "ELECTRONICA"
}))]
pub struct ProductInputDoc {
    /// 3 to 100 characters, not blank
    pub nombre: String,
    /// Up to 500 characters
    pub descripcion: Option<String>,
    /// At least 0.01
    pub precio: f64,
    /// Zero or more
    pub stock: i32,
    /// ELECTRONICA, ROPA, HOGAR, DEPORTES, LIBROS, JUGUETES, ALIMENTOS or OTROS
    pub categoria: String,
}

#[derive(ToSchema)]
#[schema(example = json!({
    "id": 1,
    "nombre": "Mouse",
    "descripcion": "Mouse inalámbrico",
    "precio": 10.0,
    "stock": 5,
    "categoria": "ELECTRONICA"
}))]
pub struct ProductResponseDoc {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: f64,
    pub stock: i32,
    pub categoria: String,
}

#[derive(ToSchema)]
#[schema(example = json!({ "stock": 3 }))]
pub struct StockUpdateDoc { pub stock: i32 }

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub status: u16,
    pub error: String,
    pub message: Option<String>,
    pub fields: Option<Vec<FieldErrorDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API REST - Gestión de Productos",
        version = "1.0",
        description = "API REST completa para la gestión de productos de un e-commerce. \
            Permite realizar operaciones CRUD sobre productos, filtrar por categoría \
            y actualizar el stock de manera individual.",
        contact(name = "Adriel Espejo - UTN Programación III", email = "tu-email@ejemplo.com"),
        license(name = "Apache 2.0", url = "https://www.apache.org/licenses/LICENSE-2.0.html")
    ),
    paths(
        crate::routes::health,
        crate::products::list,
        crate::products::get,
        crate::products::list_by_category,
        crate::products::create,
        crate::products::update,
        crate::products::update_stock,
        crate::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductInputDoc,
            ProductResponseDoc,
            StockUpdateDoc,
            FieldErrorDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "productos")
    )
)]
pub struct ApiDoc;
