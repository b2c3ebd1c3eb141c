use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::models::profile::{SajuProfile, SaveProfileRequest};
use crate::AppState;

/// The profile, or `null` when it has not been set up yet.
pub async fn get_profile(State(state): State<AppState>) -> AppResult<Json<Option<SajuProfile>>> {
    let profile = state.profiles.load().await?;
    Ok(Json(profile))
}

pub async fn save_profile(
    State(state): State<AppState>,
    Json(body): Json<SaveProfileRequest>,
) -> AppResult<Json<SajuProfile>> {
    let input = body.into_input().map_err(AppError::Validation)?;
    let profile = state.profiles.save(&input).await?;

    tracing::info!(birth_date = %profile.birth_date, "Saju profile saved");
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::json;

    use crate::test_support::{harness, send, ScriptedGenerator};

    fn put_profile(body: serde_json::Value) -> Request<Body> {
        Request::put("/api/profile")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_profile_is_null_until_saved() {
        let h = harness(ScriptedGenerator::replying(""));
        let (status, body) = send(&h, Request::get("/api/profile").body(Body::empty()).unwrap()).await;
        assert_eq!(status, 200);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_save_twice_keeps_single_profile() {
        let h = harness(ScriptedGenerator::replying(""));

        send(&h, put_profile(json!({ "birth_date": "1990-03-14", "birth_time": "07:30" }))).await;
        let (status, body) = send(
            &h,
            put_profile(json!({ "birth_date": "1991-12-01", "birth_time": "22:15" })),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["id"], 1);

        let (_, body) = send(&h, Request::get("/api/profile").body(Body::empty()).unwrap()).await;
        assert_eq!(body["birth_date"], "1991-12-01");
        assert_eq!(body["birth_time"], "22:15:00");
        assert_eq!(
            body["saju_data"],
            json!({ "birthDate": "1991-12-01", "birthTime": "22:15" })
        );
    }

    #[tokio::test]
    async fn test_bad_birth_time_is_rejected() {
        let h = harness(ScriptedGenerator::replying(""));
        let (status, body) = send(
            &h,
            put_profile(json!({ "birth_date": "1990-03-14", "birth_time": "noon" })),
        )
        .await;
        assert_eq!(status, 422);
        assert_eq!(body["error"]["code"], "validation_error");
    }
}
