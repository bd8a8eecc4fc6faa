use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "present": 24,
    "absent": 2,
    "weekoff": 4.0,
    "otHours": 6.5,
    "atd": 28.0
}))]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub weekoff: f64,
    pub ot_hours: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub atd: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minus: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitchen: Option<f64>,
}

/// One calendar cell: the normalized code as written in the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "day": 1, "code": "P", "ot": 0.0 }))]
pub struct DailyEntry {
    /// 1-based day of month
    pub day: u32,
    pub code: String,
    pub ot: f64,
}
