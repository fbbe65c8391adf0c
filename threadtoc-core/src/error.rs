use crate::HeadingLevel;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),

    #[error("invalid heading level: {0} (expected 1 to {max})", max = crate::MAX_HEADING_LEVEL)]
    InvalidLevel(HeadingLevel),

    #[error("invalid post number: {0} (post numbers start at 1)")]
    InvalidPostNumber(u32),

    #[error("table of contents structure does not nest")]
    UnbalancedTree,
}
