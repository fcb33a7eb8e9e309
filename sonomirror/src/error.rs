//! Types d'erreurs pour sonomirror

use sonosdk::{ContainerHandle, ServiceError};

/// Erreurs du miroir de containers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Container already loaded: {0}")]
    AlreadyLoaded(ContainerHandle),

    #[error("Container not registered: {0}")]
    UnknownContainer(ContainerHandle),

    /// L'attachement ou le détachement des callbacks auprès du SDK a
    /// échoué : erreur de configuration fatale, remontée à l'appelant.
    #[error("Callback registration failed: {0}")]
    Registration(#[source] ServiceError),

    #[error(transparent)]
    Tree(#[from] sonotree::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour sonomirror
pub type Result<T> = std::result::Result<T, Error>;
