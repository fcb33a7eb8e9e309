//! Types d'erreurs pour sonotree

/// Erreurs de reconstruction de l'arbre
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Le listing du SDK contient des marqueurs de folder déséquilibrés —
    /// violation de contrat du SDK, détectée et jamais tolérée.
    #[error("Unbalanced folder markers: {0}")]
    UnbalancedFolderMarkers(String),
}

/// Type Result spécialisé pour sonotree
pub type Result<T> = std::result::Result<T, Error>;
