// src/historique/stockage.rs
//
// Stockage clé -> valeur (petit, synchrone).
// - StockageMemoire : session seule (tests, ou repli si rien d’autre n’est disponible)
// - StockageFichier : un fichier JSON par clé dans le dossier de données (natif)
// - StockageLocal   : localStorage du navigateur (wasm)

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErreurStockage {
    #[error("E/S : {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON : {0}")]
    Json(#[from] serde_json::Error),

    #[error("stockage indisponible : {0}")]
    Indisponible(String),
}

/// Contrat minimal d’un stockage persistant.
pub trait Stockage {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage>;
    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage>;
    fn supprimer(&mut self, cle: &str) -> Result<(), ErreurStockage>;
}

/* ------------------------ Mémoire ------------------------ */

#[derive(Debug, Default, Clone)]
pub struct StockageMemoire {
    valeurs: HashMap<String, String>,
}

impl StockageMemoire {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stockage for StockageMemoire {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        Ok(self.valeurs.get(cle).cloned())
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.valeurs.insert(cle.to_string(), valeur.to_string());
        Ok(())
    }

    fn supprimer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
        self.valeurs.remove(cle);
        Ok(())
    }
}

/* ------------------------ Fichier (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
pub use fichier::StockageFichier;

#[cfg(not(target_arch = "wasm32"))]
mod fichier {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{ErreurStockage, Stockage};

    /// Une clé = un fichier `<dossier>/<cle>.json`.
    #[derive(Debug, Clone)]
    pub struct StockageFichier {
        dossier: PathBuf,
    }

    impl StockageFichier {
        pub fn new(dossier: impl Into<PathBuf>) -> Self {
            Self {
                dossier: dossier.into(),
            }
        }

        pub fn dossier(&self) -> &Path {
            &self.dossier
        }

        fn chemin(&self, cle: &str) -> PathBuf {
            self.dossier.join(format!("{cle}.json"))
        }
    }

    impl Stockage for StockageFichier {
        fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
            match fs::read_to_string(self.chemin(cle)) {
                Ok(s) => Ok(Some(s)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            fs::create_dir_all(&self.dossier)?;
            fs::write(self.chemin(cle), valeur)?;
            Ok(())
        }

        fn supprimer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
            match fs::remove_file(self.chemin(cle)) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}

/* ------------------------ localStorage (wasm) ------------------------ */

#[cfg(target_arch = "wasm32")]
pub use local::StockageLocal;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::{ErreurStockage, Stockage};

    /// localStorage de la fenêtre courante (quota du navigateur).
    #[derive(Debug, Default, Clone, Copy)]
    pub struct StockageLocal;

    fn storage() -> Result<web_sys::Storage, ErreurStockage> {
        web_sys::window()
            .ok_or_else(|| ErreurStockage::Indisponible("window() indisponible".into()))?
            .local_storage()
            .map_err(|e| ErreurStockage::Indisponible(format!("{e:?}")))?
            .ok_or_else(|| ErreurStockage::Indisponible("localStorage absent".into()))
    }

    fn js(e: wasm_bindgen::JsValue) -> ErreurStockage {
        ErreurStockage::Indisponible(format!("{e:?}"))
    }

    impl Stockage for StockageLocal {
        fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
            storage()?.get_item(cle).map_err(js)
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            // quota dépassé => Err (remonte comme échec best-effort)
            storage()?.set_item(cle, valeur).map_err(js)
        }

        fn supprimer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
            storage()?.remove_item(cle).map_err(js)
        }
    }
}
