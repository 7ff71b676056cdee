use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Items API", description = "CRUD service for items"),
    paths(crate::api::health::ready_handler),
    tags((name = "Health", description = "Probes"))
)]
struct ServiceDoc;

/// Service-level document with the item endpoints merged in at the root.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_items::ApiDoc::openapi());
        doc
    }
}
