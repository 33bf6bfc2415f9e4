//! Noyau : évaluation (pipeline complet)
//!
//! normalize -> balance -> multiplications implicites -> ! P C -> degrés
//!        -> RPN -> Expr -> f64 -> normaliser
//!
//! Remarque : chaque passe est une fonction pure sur `Vec<Tok>` ;
//! seule l’évaluation lit le contexte (mode d’angle, Ans, arrondi).

use tracing::debug;

use super::angles::convertir_degres;
use super::contexte::Contexte;
use super::erreur::{ErreurCalc, Resultat};
use super::implicite::inserer_multiplications;
use super::jetons::{format_tokens, normalize};
use super::lecture::{format_resultat, normaliser};
use super::parentheses::balance;
use super::postfixes::developper;
use super::rpn::{from_rpn, to_rpn};

const NOTE_PIPELINE: &str = "Pipeline: jetons → parenthèses → × implicite → ! P C → degrés → RPN → Expr → f64 → arrondi.";

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    /// Entrée évaluable, telle que reçue.
    pub source: String,
    /// Jetons après toutes les passes de réécriture.
    pub jetons: String,
    pub rpn: String,
    /// Valeur avant arrondi.
    pub brut: String,
    pub note: String,
}

/// API publique : évalue une entrée et retourne le résultat normalisé.
pub fn evaluate(source: &str, ctx: &Contexte) -> Resultat<f64> {
    evaluate_detaille(source, ctx).map(|(v, _)| v)
}

/// Comme `evaluate`, avec la démarche (jetons, RPN, valeur brute).
pub fn evaluate_detaille(source: &str, ctx: &Contexte) -> Resultat<(f64, Demarche)> {
    let s = source.trim();
    if s.is_empty() {
        return Err(ErreurCalc::syntaxe("entrée vide"));
    }

    // 1) Jetons (glyphes -> grammaire interne, % résolu)
    let jetons = normalize(s);

    // 2) Parenthèses manquantes
    let jetons = balance(jetons);

    // 3) Multiplications implicites (avant ! P C)
    let jetons = inserer_multiplications(jetons);

    // 4) n! nPr nCr
    let jetons = developper(jetons);

    // 5) sin/cos/tan en degrés
    let jetons = convertir_degres(jetons, ctx.mode_angle);
    let jetons_txt = format_tokens(&jetons);
    debug!(jetons = %jetons_txt, mode = ?ctx.mode_angle, "jetons réécrits");

    // 6) RPN + AST
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;

    // 7) Valeur
    let brut = expr.eval(ctx.dernier_resultat)?;
    let v = normaliser(brut, &ctx.arrondi);
    debug!(brut, resultat = v, "évaluation");

    let d = Demarche {
        source: s.to_string(),
        jetons: jetons_txt,
        rpn: format_tokens(&rpn),
        brut: format_resultat(brut),
        note: NOTE_PIPELINE.into(),
    };

    Ok((v, d))
}
