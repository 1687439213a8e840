//! Read endpoints over the stored events.
//!
//! ```text
//! GET /files/collection
//! GET /organizations/ids
//! ```

use actix_web::http::header::{
    CONTENT_TYPE, ContentDisposition, DispositionParam, DispositionType,
};
use actix_web::{HttpResponse, get, web};

use crate::domain::Error;
use crate::domain::ports::OrganizationIds;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{FeatureCollectionSchema, OrganizationIdsSchema};
use crate::inbound::http::state::HttpState;

/// Media type of the feature collection download.
pub const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";
/// File name suggested to clients downloading the collection.
pub const COLLECTION_FILENAME: &str = "collection.geojson";

/// Download every stored footprint as one GeoJSON feature collection.
///
/// Footprints that no longer parse as features are left out.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use planet::inbound::http::events::get_collection;
///
/// let app = App::new().service(get_collection);
/// ```
#[utoipa::path(
    get,
    path = "/files/collection",
    responses(
        (status = 200, description = "Feature collection attachment",
            content_type = "application/geo+json",
            body = FeatureCollectionSchema,
            headers((
                "Content-Disposition" = String,
                description = "attachment; filename=\"collection.geojson\""
            ))),
        (
            status = 500,
            description = "Store failure; raw message",
            content_type = "text/plain",
            body = String
        )
    ),
    tags = ["events"],
    operation_id = "getCollection"
)]
#[get("/files/collection")]
pub async fn get_collection(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let collection = state.events.feature_collection().await?;
    let body = serde_json::to_vec(&collection)
        .map_err(|err| Error::internal(format!("failed to encode feature collection: {err}")))?;

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, GEOJSON_CONTENT_TYPE))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(COLLECTION_FILENAME.to_owned())],
        })
        .body(body))
}

/// List distinct organization ids that have a stored footprint.
#[utoipa::path(
    get,
    path = "/organizations/ids",
    responses(
        (status = 200, description = "Distinct organization ids", body = OrganizationIdsSchema),
        (
            status = 500,
            description = "Store failure; raw message",
            content_type = "text/plain",
            body = String
        )
    ),
    tags = ["events"],
    operation_id = "getOrganizationIds"
)]
#[get("/organizations/ids")]
pub async fn get_organization_ids(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<OrganizationIds>> {
    let ids = state.events.organization_ids().await?;
    Ok(web::Json(ids))
}
