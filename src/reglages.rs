//! Réglages utilisateur (TOML).
//!
//! Fichier : `<config_dir>/calculatrice-scientifique/reglages.toml` (natif seulement).
//! Absent => valeurs par défaut. Illisible => valeurs par défaut + avertissement.
//!
//! ```toml
//! mode_angle = "radian"
//! decimales = 8
//! aimanter_unite = false
//! dossier_donnees = "/tmp/calc"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::noyau::contexte::{DECIMALES_DEFAUT, DECIMALES_MAX, SEUIL_ZERO_DEFAUT};
use crate::noyau::{Arrondi, Contexte, ModeAngle};

/// Sous-dossier propre à l’application (config + données).
pub const NOM_DOSSIER: &str = "calculatrice-scientifique";

const NOM_FICHIER: &str = "reglages.toml";

#[derive(Error, Debug)]
pub enum ErreurReglages {
    #[error("lecture des réglages : {0}")]
    Io(#[from] std::io::Error),

    #[error("réglages invalides : {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    /// Mode d’angle au démarrage.
    pub mode_angle: ModeAngle,
    pub decimales: u32,
    pub seuil_zero: f64,
    pub aimanter_unite: bool,
    /// Remplace le dossier de données de la plateforme (historique).
    pub dossier_donnees: Option<PathBuf>,
}

impl Default for Reglages {
    fn default() -> Self {
        let a = Arrondi::default();
        Self {
            mode_angle: ModeAngle::default(),
            decimales: DECIMALES_DEFAUT,
            seuil_zero: SEUIL_ZERO_DEFAUT,
            aimanter_unite: a.aimanter_unite,
            dossier_donnees: None,
        }
    }
}

impl Reglages {
    pub fn depuis_toml(texte: &str) -> Result<Self, ErreurReglages> {
        Ok(toml::from_str(texte)?)
    }

    /// Lit un fichier précis. Fichier absent => défauts (pas une erreur).
    pub fn charger_depuis(chemin: &Path) -> Result<Self, ErreurReglages> {
        match std::fs::read_to_string(chemin) {
            Ok(texte) => Self::depuis_toml(&texte),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Réglages de la plateforme ; jamais d’échec (repli sur les défauts).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn charger() -> Self {
        let Some(chemin) = dirs::config_dir().map(|d| d.join(NOM_DOSSIER).join(NOM_FICHIER)) else {
            return Self::default();
        };
        match Self::charger_depuis(&chemin) {
            Ok(r) => {
                info!(chemin = %chemin.display(), mode = ?r.mode_angle, decimales = r.decimales, "réglages chargés");
                r
            }
            Err(e) => {
                warn!(chemin = %chemin.display(), erreur = %e, "réglages ignorés");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn charger() -> Self {
        Self::default()
    }

    /// Dossier de l’historique : réglage explicite, sinon dossier de données de la plateforme.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn dossier_historique(&self) -> Option<PathBuf> {
        self.dossier_donnees
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(NOM_DOSSIER)))
    }

    /// Arrondi borné (décimales ≤ 15, seuil fini et positif).
    pub fn arrondi(&self) -> Arrondi {
        let seuil_zero = if self.seuil_zero.is_finite() && self.seuil_zero > 0.0 {
            self.seuil_zero
        } else {
            SEUIL_ZERO_DEFAUT
        };
        Arrondi {
            decimales: self.decimales.min(DECIMALES_MAX),
            seuil_zero,
            aimanter_unite: self.aimanter_unite,
        }
    }

    pub fn contexte(&self) -> Contexte {
        Contexte::new(self.mode_angle, self.arrondi())
    }
}
