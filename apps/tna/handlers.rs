use crate::AppState;
use crate::error::ApiError;
use crate::industries::{self, IndustriesResponse};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use rand::Rng;
use tracing::info;
use utils::errors::{ORGANIZATION_ADDED, ORGANIZATION_ALREADY_EXISTS, ORGANIZATION_NOT_FOUND};
use utils::types::{NewOrganization, Organization, OrganizationCreated, TrainingRecommendations};

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ID_LEN: usize = 11;

/// Random 11-character upper-case alphanumeric identifier
pub fn generate_short_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect()
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn add_organization(
    State(state): State<AppState>,
    payload: Result<Json<NewOrganization>, JsonRejection>,
) -> Result<Json<OrganizationCreated>, ApiError> {
    let Json(new) = payload?;
    let _guard = state.create_lock.lock().await;

    if state.store.load().await?.is_some() {
        return Err(ApiError::Conflict(ORGANIZATION_ALREADY_EXISTS.to_string()));
    }

    let organization = Organization::from_new(generate_short_id(), new);
    state.store.save(&organization).await?;

    info!(
        organization_id = %organization.organization_id,
        objectives = organization.objectives.len(),
        "Organization added"
    );

    Ok(Json(OrganizationCreated {
        message: ORGANIZATION_ADDED.to_string(),
        organization_id: organization.organization_id,
    }))
}

pub async fn get_organization(
    State(state): State<AppState>,
) -> Result<Json<Organization>, ApiError> {
    state
        .store
        .load()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(ORGANIZATION_NOT_FOUND.to_string()))
}

pub async fn generate_training_recommendations(
    State(state): State<AppState>,
) -> Result<Json<TrainingRecommendations>, ApiError> {
    let organization = state
        .store
        .load()
        .await?
        .ok_or_else(|| ApiError::NotFound(ORGANIZATION_NOT_FOUND.to_string()))?;

    let recommendations = state
        .engine
        .recommend(
            &organization.objectives,
            &state.catalog,
            state.top_k_per_objective,
        )
        .await?;

    Ok(Json(TrainingRecommendations {
        training_recommendations: recommendations.into_vec(),
    }))
}

pub async fn get_industries() -> Json<IndustriesResponse> {
    Json(industries::directory())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_shape() {
        let id = generate_short_id();
        assert_eq!(id.len(), 11);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
