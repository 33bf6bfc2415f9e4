// src/noyau/erreur.rs
//
// Erreurs du noyau : trois familles seulement.
// Toutes se replient, côté session, sur un seul état visible (« Erreur » + entrée vidée).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurCalc {
    /// Suite de jetons mal formée, jeton inconnu, marque non développée, parenthèse en trop.
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    /// Factorielle / nPr / nCr hors domaine (négatif, non entier, r > n).
    #[error("hors domaine : {0}")]
    Domaine(String),

    /// Division par zéro, forme indéterminée, dépassement (∞ / NaN).
    #[error("erreur numérique : {0}")]
    Numerique(String),
}

impl ErreurCalc {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        Self::Domaine(msg.into())
    }

    pub fn numerique(msg: impl Into<String>) -> Self {
        Self::Numerique(msg.into())
    }
}

pub type Resultat<T> = std::result::Result<T, ErreurCalc>;

/// Garde-fou : toute valeur non finie devient une erreur numérique.
pub fn fini(v: f64, quoi: &str) -> Resultat<f64> {
    if v.is_nan() {
        Err(ErreurCalc::numerique(format!("{quoi} : forme indéterminée")))
    } else if v.is_infinite() {
        Err(ErreurCalc::numerique(format!("{quoi} : dépassement")))
    } else {
        Ok(v)
    }
}
