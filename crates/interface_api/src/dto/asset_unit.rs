//! Asset unit DTOs

use serde::Deserialize;
use validator::Validate;

use domain_asset::AssetUnitWriteRequest;

/// Body of a write request
///
/// Absent fields default to empty strings and zero, so `{}` parses and is
/// then rejected by validation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct WriteAssetUnitRequest {
    #[validate(length(min = 1, message = "AssetCode must not be empty"))]
    pub asset_code: String,
    #[validate(length(min = 1, message = "Date must not be empty"))]
    pub date: String,
    pub unit: i64,
    pub amount: i64,
}

impl From<WriteAssetUnitRequest> for AssetUnitWriteRequest {
    fn from(request: WriteAssetUnitRequest) -> Self {
        Self {
            asset_code: request.asset_code,
            date: request.date,
            unit: request.unit,
            amount: request.amount,
        }
    }
}

/// Query string of a list request
#[derive(Debug, Default, Deserialize)]
pub struct ListAssetUnitsParams {
    pub date: Option<String>,
}
