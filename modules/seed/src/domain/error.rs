use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Invalid seed secret")]
    InvalidSecret,

    #[error("Seeding failed: {0}")]
    Failed(#[from] anyhow::Error),
}
