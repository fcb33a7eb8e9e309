//! Configuration du miroir

/// Configuration d'une session miroir
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Résoudre les noms de playlists et de folders pendant le scan.
    ///
    /// Chaque nom coûte un appel SDK supplémentaire par slot ; un miroir
    /// qui ne travaille qu'avec les handles peut s'en passer.
    pub fetch_names: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self { fetch_names: true }
    }
}
