//! JSON REST endpoints served next to the GraphQL API.

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Extension, Json,
};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{Deserialize, Serialize};
use service::{
    command::AnalyzeRoom, domain::Analysis, infra::vision::Image, Command as _,
};

use crate::{api::estimate::ImageError, AsError, Error, Service};

/// Body of an [`analyze_room()`] request.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRoomRequest {
    /// Room photo as a `data:` URL or a remote URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Name of the flooring material the customer is interested in.
    #[serde(default)]
    pub material: Option<String>,
}

/// Body of a successful [`analyze_room()`] response.
#[derive(Debug, Serialize)]
pub struct AnalyzeRoomResponse {
    /// Always `true`, as the fallback estimate is returned on failures.
    pub success: bool,

    /// Estimated room.
    pub analysis: RoomAnalysis,

    /// Indicator whether the [`analysis`] is a placeholder.
    ///
    /// [`analysis`]: AnalyzeRoomResponse::analysis
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl From<Analysis> for AnalyzeRoomResponse {
    fn from(analysis: Analysis) -> Self {
        let Analysis {
            estimate,
            is_fallback,
        } = analysis;
        let number = |d: Decimal| d.normalize().to_f64().unwrap_or_default();

        Self {
            success: true,
            analysis: RoomAnalysis {
                estimated_length: number(estimate.length().into()),
                estimated_width: number(estimate.width().into()),
                estimated_sq_ft: number(estimate.area().into()),
                condition: estimate.condition.to_string(),
                room_type: estimate.room_type,
                current_floor_type: estimate.current_floor_type,
                notes: estimate.notes,
            },
            fallback: is_fallback,
        }
    }
}

/// Room estimated from a photo.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAnalysis {
    /// Kind of the room, like `Kitchen`.
    pub room_type: String,

    /// Estimated length in feet.
    pub estimated_length: f64,

    /// Estimated width in feet.
    pub estimated_width: f64,

    /// Estimated floor area in square feet.
    #[serde(rename = "estimatedSqFt")]
    pub estimated_sq_ft: f64,

    /// Flooring currently installed.
    pub current_floor_type: String,

    /// Condition of the current flooring: `good`, `fair` or `poor`.
    pub condition: String,

    /// Free-form notes about the room.
    pub notes: String,
}

/// Body of a failed request.
#[derive(Debug, Serialize)]
pub struct Failure {
    /// Human-readable description of the failure.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(Failure {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Estimates a room from its photo.
///
/// Responds with `400 Bad Request` only if no image is provided. Failures of
/// the vision model are reported as a successful fallback estimate.
#[tracing::instrument(skip_all, fields(otel.name = "POST /api/analyze-room"))]
pub async fn analyze_room(
    Extension(service): Extension<Service>,
    body: Result<Json<AnalyzeRoomRequest>, JsonRejection>,
) -> Result<Json<AnalyzeRoomResponse>, Error> {
    let Json(AnalyzeRoomRequest { image, material }) =
        body.map_err(AsError::into_error)?;
    let image = image
        .and_then(Image::new)
        .ok_or_else(|| Error::from(ImageError::NoImage))?;

    let analysis = service
        .execute(AnalyzeRoom { image, material })
        .await
        .unwrap_or_else(|e| match e {});

    Ok(Json(analysis.into()))
}

#[cfg(test)]
mod spec {
    use axum::response::IntoResponse as _;
    use serde_json::json;
    use service::domain::Analysis;

    use crate::{api::estimate::ImageError, Error};

    use super::{AnalyzeRoomRequest, AnalyzeRoomResponse};

    #[test]
    fn serializes_fallback() {
        let resp = AnalyzeRoomResponse::from(Analysis::fallback());

        assert_eq!(
            serde_json::to_value(resp).unwrap(),
            json!({
                "success": true,
                "analysis": {
                    "roomType": "Living Room",
                    "estimatedLength": 18.0,
                    "estimatedWidth": 14.0,
                    "estimatedSqFt": 252.0,
                    "currentFloorType": "Carpet",
                    "condition": "fair",
                    "notes": Analysis::FALLBACK_NOTES,
                },
                "fallback": true,
            }),
        );
    }

    #[test]
    fn omits_fallback_flag_on_success() {
        let mut analysis = Analysis::fallback();
        analysis.is_fallback = false;

        let value =
            serde_json::to_value(AnalyzeRoomResponse::from(analysis)).unwrap();

        assert!(value.get("fallback").is_none());
        assert_eq!(value["success"], json!(true));
    }

    #[test]
    fn tolerates_missing_fields() {
        let req: AnalyzeRoomRequest =
            serde_json::from_value(json!({"material": "Oak"})).unwrap();

        assert!(req.image.is_none());
        assert_eq!(req.material.as_deref(), Some("Oak"));
    }

    #[test]
    fn responds_with_bad_request_on_no_image() {
        let resp = Error::from(ImageError::NoImage).into_response();

        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    }
}
