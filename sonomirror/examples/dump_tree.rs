//! Exemple : reconstruire un container simulé et afficher sa hiérarchie
//!
//! Cet exemple démontre :
//! - Le montage d'une session miroir sur le simulateur du SDK
//! - Le cycle chargement → notification → reconstruction
//! - L'export markdown de l'arbre reconstruit
//!
//! Pour exécuter :
//! ```bash
//! cargo run -p sonomirror --example dump_tree
//! ```

use sonomirror::{MirrorConfig, MirrorSession};
use sonosdk::sim::{SimService, SimSlot};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let sdk = SimService::new();
    let container = sdk.add_container();

    let morning = sdk.add_playlist("Morning Coffee");
    let blue = sdk.add_playlist("Blue Train");
    let kind = sdk.add_playlist("Kind of Blue");
    let focus = sdk.add_playlist("Deep Focus");

    sdk.set_slots(
        container,
        vec![
            SimSlot::Playlist(morning),
            SimSlot::FolderStart("Jazz".into()),
            SimSlot::Playlist(blue),
            SimSlot::Playlist(kind),
            SimSlot::FolderEnd,
            SimSlot::Playlist(focus),
        ],
    );

    let session = MirrorSession::new(sdk.clone(), MirrorConfig::default());
    let mirror = session
        .load_container(container)
        .expect("failed to load container");

    // Le SDK signale la fin du chargement sur son thread de notification
    sdk.notify_container_loaded(container);

    println!("=== Hiérarchie reconstruite ===\n");
    print!("{}", mirror.to_markdown());

    // Une mutation incrémentale arrive après coup
    let late = sdk.add_playlist("Late Night");
    sdk.notify_playlist_added(container, late, 0);

    println!("\n=== Après ajout incrémental ===\n");
    print!("{}", mirror.to_markdown());
}
