use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(url(message = "Invalid URL"))]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditQuizRequest {
    pub quiz_id: String,
    pub deleted_item_idxs: Vec<usize>,
    #[serde(default)]
    pub additional_instructions: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePublishRequest {
    pub quiz_id: String,
}
