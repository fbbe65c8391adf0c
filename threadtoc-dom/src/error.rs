#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] threadtoc_core::Error),

    #[error(transparent)]
    Render(#[from] threadtoc_converters_html::Error),

    #[error("node is not part of the document")]
    DetachedNode,
}
