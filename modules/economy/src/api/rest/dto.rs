use serde::{Deserialize, Serialize};

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
