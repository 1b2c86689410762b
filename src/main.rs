use axum::Router;
use dotenvy::dotenv;
use schema_crawler_api::{
    config::app_config::AppConfig,
    schema_crawler::{
        build_schema_crawler_router,
        interfaces::rest::resources::{
            column_resource::ColumnResource, foreign_key_resource::ForeignKeyResource,
            index_resource::IndexResource,
            schema_error_response_resource::SchemaErrorResponseResource,
            table_resource::TableResource,
        },
    },
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        schema_crawler_api::schema_crawler::interfaces::rest::controllers::schema_rest_controller::list_tables,
        schema_crawler_api::schema_crawler::interfaces::rest::controllers::schema_rest_controller::get_table,
        schema_crawler_api::schema_crawler::interfaces::rest::controllers::schema_rest_controller::get_table_columns,
        schema_crawler_api::schema_crawler::interfaces::rest::controllers::schema_rest_controller::clear_schema_cache,
        schema_crawler_api::schema_crawler::interfaces::rest::controllers::schema_rest_controller::invalidate_table_cache
    ),
    components(
        schemas(
            TableResource,
            ColumnResource,
            ForeignKeyResource,
            IndexResource,
            SchemaErrorResponseResource
        )
    ),
    tags(
        (name = "schema", description = "Database schema metadata read from the live catalog")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let schema_router = build_schema_crawler_router(&config)
        .await
        .expect("failed to build schema crawler router");

    let app = Router::new()
        .merge(schema_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind server address");

    info!("server listening on http://localhost:{}", config.port);
    info!(
        "Swagger UI available at http://localhost:{}/swagger-ui",
        config.port
    );

    axum::serve(listener, app)
        .await
        .expect("failed to start axum server");
}
