use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[schema(example = "3f2c8c1e-6a0b-4d6e-9a59-1c1f3b1e2d4a.xlsx")]
    pub id: String,

    #[schema(example = 48213)]
    pub size: u64,

    #[schema(example = "2026-01-31T10:15:00+00:00", format = DateTime)]
    pub uploaded_at: String,
}
