//! Contexte d’évaluation (une instance par session).
//!
//! - mode d’angle et mémoire survivent aux effacements
//! - `dernier_resultat` est écrasé à chaque évaluation réussie
//! - `arrondi` vient des réglages (voir `crate::reglages`)

use serde::{Deserialize, Serialize};

/// Arrondi par défaut : 10 décimales.
pub const DECIMALES_DEFAUT: u32 = 10;

/// Garde-fou : au-delà, f64 n’a plus de chiffres significatifs à offrir.
pub const DECIMALES_MAX: u32 = 15;

/// Sous ce seuil (en valeur absolue), un résultat devient exactement 0.
pub const SEUIL_ZERO_DEFAUT: f64 = 1e-10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAngle {
    #[default]
    Degre,
    Radian,
}

impl ModeAngle {
    pub fn bascule(self) -> Self {
        match self {
            ModeAngle::Degre => ModeAngle::Radian,
            ModeAngle::Radian => ModeAngle::Degre,
        }
    }

    /// Libellé du bouton (DEG / RAD).
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degre => "DEG",
            ModeAngle::Radian => "RAD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrondi {
    pub decimales: u32,
    pub seuil_zero: f64,
    /// Aimante les valeurs à moins de `seuil_zero` de ±1 (sin(90°), cos(0)…).
    pub aimanter_unite: bool,
}

impl Default for Arrondi {
    fn default() -> Self {
        Self {
            decimales: DECIMALES_DEFAUT,
            seuil_zero: SEUIL_ZERO_DEFAUT,
            aimanter_unite: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contexte {
    pub mode_angle: ModeAngle,
    pub memoire: f64,
    pub dernier_resultat: f64,
    pub arrondi: Arrondi,
}

impl Contexte {
    pub fn new(mode_angle: ModeAngle, arrondi: Arrondi) -> Self {
        Self {
            mode_angle,
            arrondi,
            ..Default::default()
        }
    }

    pub fn basculer_mode_angle(&mut self) {
        self.mode_angle = self.mode_angle.bascule();
    }
}
