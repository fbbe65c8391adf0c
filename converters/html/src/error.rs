#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),

    #[error(transparent)]
    Core(#[from] threadtoc_core::Error),

    #[error("invalid heading selector: {0}")]
    InvalidSelector(String),
}
