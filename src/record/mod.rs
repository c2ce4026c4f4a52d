use serde::{Deserialize, Serialize};

pub mod icon;
pub mod normalize;

pub use normalize::normalize;

/// Entity kinds the search endpoint can be asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Status,
    Action,
}

/// Order in which a single name is tried against the API.
pub const RESOLUTION_ORDER: [ResourceType; 2] = [ResourceType::Status, ResourceType::Action];

impl ResourceType {
    /// Value of the `type` query parameter.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            ResourceType::Status => "Status",
            ResourceType::Action => "Action",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Status => "status",
            ResourceType::Action => "action",
        }
    }

    /// Record type that overrides whatever the payload says.
    pub fn forced_record_type(&self) -> Option<&'static str> {
        match self {
            ResourceType::Status => None,
            ResourceType::Action => Some("Action"),
        }
    }

    /// Empty for Status, a placeholder sentence for Action.
    pub fn default_description(&self) -> &'static str {
        match self {
            ResourceType::Status => "",
            ResourceType::Action => "No description available",
        }
    }

    pub fn empty_reason(&self) -> &'static str {
        match self {
            ResourceType::Status => "No data found",
            ResourceType::Action => "No action data found",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Canonical status/action entry. Field names on disk follow the processed artifact layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(rename = "icon")]
    pub icon_id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(rename = "id")]
    pub numeric_id: i64,
    #[serde(rename = "api_path")]
    pub icon_url: String,
    pub description: String,
}
