use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub kategori: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResultDto {
    pub message: String,
    pub imported_count: usize,
}

impl ImportResultDto {
    #[must_use]
    pub fn new(imported_count: usize) -> Self {
        Self {
            message: "Import successful".to_owned(),
            imported_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadImageDto {
    pub message: String,
    pub image_url: String,
}

impl UploadImageDto {
    #[must_use]
    pub fn new(image_url: String) -> Self {
        Self {
            message: "Image uploaded successfully".to_owned(),
            image_url,
        }
    }
}
