//! Session : état vivant d’une calculatrice (saisie + contexte + indicateur d’erreur).
//!
//! Contrats :
//! - toute opération publique retourne un succès ou une `ErreurCalc`, jamais de panique
//! - une erreur vide la saisie et affiche `INDICATEUR_ERREUR`, sans toucher
//!   à la mémoire ni au mode d’angle
//! - un succès remplace la saisie par le résultat (calcul enchaîné) et produit un `Calcul`
//!   que l’appelant reporte dans l’historique

use tracing::debug;

use super::combinatoire::factorial;
use super::contexte::Contexte;
use super::erreur::{fini, ErreurCalc, Resultat};
use super::eval::{evaluate, evaluate_detaille, Demarche};
use super::lecture::{format_resultat, normaliser};
use super::saisie::{append_token, delete_last, Entree, Expression};

/// Ce que voit l’utilisateur après une erreur (quelle qu’en soit la famille).
pub const INDICATEUR_ERREUR: &str = "Erreur";

/// Un calcul réussi, prêt pour l’historique.
#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    /// Expression telle qu’affichée (glyphes compris).
    pub expression: String,
    pub resultat: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub saisie: Expression,
    pub contexte: Contexte,
    erreur: Option<ErreurCalc>,
    demarche: Option<Demarche>,
}

impl Session {
    pub fn new(contexte: Contexte) -> Self {
        Self {
            contexte,
            ..Default::default()
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn affichage(&self) -> String {
        if self.erreur.is_some() {
            INDICATEUR_ERREUR.to_string()
        } else {
            self.saisie.affichage()
        }
    }

    pub fn erreur(&self) -> Option<&ErreurCalc> {
        self.erreur.as_ref()
    }

    /// Démarche de la dernière évaluation « = » réussie.
    pub fn demarche(&self) -> Option<&Demarche> {
        self.demarche.as_ref()
    }

    /* ------------------------ Saisie ------------------------ */

    pub fn saisir(&mut self, entree: Entree) {
        self.erreur = None;
        self.saisie = append_token(&self.saisie, entree);
    }

    pub fn effacer_dernier(&mut self) {
        if self.erreur.take().is_some() {
            return;
        }
        self.saisie = delete_last(&self.saisie);
    }

    /// C : vide la saisie (mémoire et mode d’angle conservés).
    pub fn effacer(&mut self) {
        self.erreur = None;
        self.saisie = Expression::new();
    }

    pub fn basculer_mode_angle(&mut self) {
        self.contexte.basculer_mode_angle();
    }

    /* ------------------------ Évaluation ------------------------ */

    /// « = » : évalue la saisie complète.
    pub fn evaluer(&mut self) -> Resultat<Calcul> {
        let expression = self.saisie.affichage().trim().to_string();
        let res = evaluate_detaille(&self.saisie.source(), &self.contexte).map(|(v, d)| {
            self.demarche = Some(d);
            Calcul {
                expression,
                resultat: v,
            }
        });
        self.conclure(res)
    }

    /// x√y : la saisie doit être « x,y ».
    pub fn x_root(&mut self) -> Resultat<Calcul> {
        let res = lire_couple(&self.saisie.source()).and_then(|(x, y)| {
            let r = x_root(x, y)?;
            Ok(Calcul {
                expression: format!("{}√{}", format_resultat(x), format_resultat(y)),
                resultat: normaliser(r, &self.contexte.arrondi),
            })
        });
        self.conclure(res)
    }

    /// 1/x sur la valeur de la saisie.
    pub fn reciprocal(&mut self) -> Resultat<Calcul> {
        let res = evaluate(&self.saisie.source(), &self.contexte).and_then(|n| {
            if n == 0.0 {
                return Err(ErreurCalc::numerique("division par zéro"));
            }
            Ok(Calcul {
                expression: format!("1/({})", format_resultat(n)),
                resultat: normaliser(fini(1.0 / n, "inverse")?, &self.contexte.arrondi),
            })
        });
        self.conclure(res)
    }

    /// x² : évalue (saisie)^2.
    pub fn square(&mut self) -> Resultat<Calcul> {
        let source = format!("({})^2", self.saisie.source());
        let expression = format!("({})²", self.saisie.affichage());
        let res = evaluate(&source, &self.contexte).map(|v| Calcul {
            expression,
            resultat: v,
        });
        self.conclure(res)
    }

    /// n! sur la valeur de la saisie (bouton dédié, opérande quelconque).
    pub fn factorielle(&mut self) -> Resultat<Calcul> {
        let res = evaluate(&self.saisie.source(), &self.contexte).and_then(|n| {
            Ok(Calcul {
                expression: format!("{}!", format_resultat(n)),
                resultat: factorial(n)?,
            })
        });
        self.conclure(res)
    }

    /// Point unique de sortie des opérations qui évaluent.
    fn conclure(&mut self, res: Resultat<Calcul>) -> Resultat<Calcul> {
        match res {
            Ok(c) => {
                debug!(expression = %c.expression, resultat = c.resultat, "calcul réussi");
                self.contexte.dernier_resultat = c.resultat;
                self.saisie = Expression::depuis_resultat(c.resultat);
                self.erreur = None;
                Ok(c)
            }
            Err(e) => {
                debug!(erreur = %e, "calcul refusé");
                self.saisie = Expression::new();
                self.erreur = Some(e.clone());
                Err(e)
            }
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    /// Valeur de la saisie, 0 si elle ne s’évalue pas (jamais d’erreur).
    pub fn valeur_courante(&self) -> f64 {
        if self.saisie.is_empty() {
            return 0.0;
        }
        evaluate(&self.saisie.source(), &self.contexte).unwrap_or(0.0)
    }

    pub fn memoire_ajouter(&mut self) {
        self.contexte.memoire += self.valeur_courante();
    }

    pub fn memoire_soustraire(&mut self) {
        self.contexte.memoire -= self.valeur_courante();
    }

    /// MR : ajoute la mémoire à la saisie, sans évaluer.
    pub fn memoire_rappeler(&mut self) {
        let m = self.contexte.memoire;
        self.saisir(Entree::nombre(m));
    }

    pub fn memoire_effacer(&mut self) {
        self.contexte.memoire = 0.0;
    }
}

/* ------------------------ Opérations spéciales (pures) ------------------------ */

/// « x,y » -> (x, y), deux nombres finis.
pub fn lire_couple(texte: &str) -> Resultat<(f64, f64)> {
    let invalide = || ErreurCalc::syntaxe(format!("x√y attend « x,y », reçu « {texte} »"));

    // un résultat négatif enchaîné arrive sous la forme « (-3) »
    let nombre = |s: &str| -> Resultat<f64> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .unwrap_or(s);
        s.trim().parse().map_err(|_| invalide())
    };

    let (a, b) = texte.split_once(',').ok_or_else(invalide)?;
    let x = nombre(a)?;
    let y = nombre(b)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalide());
    }
    Ok((x, y))
}

/// Racine x-ième de y : y^(1/x).
pub fn x_root(x: f64, y: f64) -> Resultat<f64> {
    if x == 0.0 {
        return Err(ErreurCalc::numerique("x√y : indice nul (exposant 1/0)"));
    }
    fini(y.powf(1.0 / x), "x√y")
}
