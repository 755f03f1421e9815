//! Owner reporting endpoints.

use axum::{
    extract::{Extension, State},
    Json,
};

use domain::models::{Actor, WarehouseSummary};
use persistence::repositories::WarehouseRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Cross-warehouse summary: sensor count, open alert count, latest
/// measurement and threshold presence per warehouse.
///
/// GET /api/v1/reports/warehouse-summary
pub async fn warehouse_summary(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<WarehouseSummary>>, ApiError> {
    actor.require_owner()?;

    let rows = WarehouseRepository::new(state.pool.clone())
        .summary()
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
