//! Noyau de calcul (f64, grammaire restreinte)
//!
//! Organisation interne :
//! - jetons.rs       : tokenisation + normalisation (× ÷ ^ % …)
//! - parentheses.rs  : ')' manquantes
//! - implicite.rs    : multiplications implicites
//! - postfixes.rs    : n! nPr nCr -> appels
//! - angles.rs       : sin/cos/tan en degrés
//! - rpn.rs          : shunting-yard + construction Expr (liste blanche)
//! - expr.rs         : AST + évaluation f64
//! - combinatoire.rs : factorial / nPr / nCr exacts
//! - lecture.rs      : arrondi + texte du résultat
//! - eval.rs         : pipeline complet
//! - contexte.rs     : mode d’angle, mémoire, Ans, arrondi
//! - saisie.rs       : expression touche par touche (affichage + source)
//! - session.rs      : opérations utilisateur (=, x√y, 1/x, x², mémoire)

pub mod angles;
pub mod combinatoire;
pub mod contexte;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod implicite;
pub mod jetons;
pub mod lecture;
pub mod parentheses;
pub mod postfixes;
pub mod rpn;
pub mod saisie;
pub mod session;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use contexte::{Arrondi, Contexte, ModeAngle};
pub use erreur::ErreurCalc;
pub use jetons::Fonction;
pub use saisie::{Entree, Operateur};
pub use session::{Calcul, Session};
