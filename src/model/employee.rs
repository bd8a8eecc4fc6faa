use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One employee row of the attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "number": "007", "name": "John Doe" }))]
pub struct Employee {
    #[schema(example = "007")]
    pub number: String,

    #[schema(example = "John Doe")]
    pub name: String,
}

/// Contact columns kept to the right of the summary block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "9876543210")]
    pub mobile1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "9123456780")]
    pub mobile2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "12 Station Road, Pune")]
    pub present_address: Option<String>,
}
