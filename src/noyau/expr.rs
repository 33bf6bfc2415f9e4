// src/noyau/expr.rs
//
// AST flottant (f64) + évaluation itérative (pile explicite).
// - Num : littéral décimal
// - Pi  : constante π
// - Ans : dernier résultat (lu dans le contexte au moment de l’évaluation)
// - Appel : fonction de la liste blanche (arité déjà vérifiée par to_rpn)
//
// IMPORTANT (SAFE):
// - chaque nœud vérifie que sa valeur est finie : ∞ / NaN ne remontent jamais
// - division par zéro refusée AVANT le calcul

use std::f64::consts::PI;

use super::combinatoire::{factorial, ncr, npr};
use super::erreur::{fini, ErreurCalc, Resultat};
use super::jetons::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Pi,
    Ans,

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Vec<Expr>),
}

/// Étape du parcours : descendre dans un nœud, ou combiner ses opérandes
/// une fois qu’elles sont sur la pile de valeurs.
enum Etape<'a> {
    Descendre(&'a Expr),
    Combiner(&'a Expr),
}

impl Expr {
    /// Évalue l’arbre. `ans` = dernier résultat de la session.
    ///
    /// Parcours postfixe avec pile explicite : la profondeur de l’arbre
    /// (ex. `1+1+…+1`) ne consomme pas la pile d’appels.
    pub fn eval(&self, ans: f64) -> Resultat<f64> {
        use Expr::*;

        let mut etapes = vec![Etape::Descendre(self)];
        let mut valeurs: Vec<f64> = Vec::new();

        while let Some(etape) = etapes.pop() {
            match etape {
                Etape::Descendre(e) => match e {
                    Num(v) => valeurs.push(fini(*v, "littéral")?),
                    Pi => valeurs.push(PI),
                    Ans => valeurs.push(ans),

                    Neg(x) => {
                        etapes.push(Etape::Combiner(e));
                        etapes.push(Etape::Descendre(x));
                    }
                    Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                        // a est dépilé (donc évalué) avant b
                        etapes.push(Etape::Combiner(e));
                        etapes.push(Etape::Descendre(b));
                        etapes.push(Etape::Descendre(a));
                    }
                    Appel(_, args) => {
                        etapes.push(Etape::Combiner(e));
                        etapes.extend(args.iter().rev().map(Etape::Descendre));
                    }
                },

                Etape::Combiner(e) => {
                    let v = combiner(e, &mut valeurs)?;
                    valeurs.push(v);
                }
            }
        }

        match (valeurs.pop(), valeurs.is_empty()) {
            (Some(v), true) => Ok(v),
            _ => Err(ErreurCalc::syntaxe("expression incomplète")),
        }
    }
}

/// Applique le nœud `e` à ses opérandes (sommet de `valeurs`).
fn combiner(e: &Expr, valeurs: &mut Vec<f64>) -> Resultat<f64> {
    use Expr::*;

    match e {
        Neg(_) => Ok(-depiler(valeurs)?),

        Add(..) | Sub(..) | Mul(..) | Div(..) | Pow(..) => {
            let b = depiler(valeurs)?;
            let a = depiler(valeurs)?;
            match e {
                Add(..) => fini(a + b, "addition"),
                Sub(..) => fini(a - b, "soustraction"),
                Mul(..) => fini(a * b, "multiplication"),
                Div(..) => {
                    if b == 0.0 {
                        return Err(ErreurCalc::numerique("division par zéro"));
                    }
                    fini(a / b, "division")
                }
                _ => {
                    if a == 0.0 && b < 0.0 {
                        return Err(ErreurCalc::numerique("division par zéro (0 à une puissance négative)"));
                    }
                    fini(a.powf(b), "puissance")
                }
            }
        }

        Appel(f, args) => {
            let debut = valeurs
                .len()
                .checked_sub(args.len())
                .ok_or_else(|| ErreurCalc::syntaxe(format!("{} : argument manquant", f.nom())))?;
            let vals = valeurs.split_off(debut);
            appliquer(*f, &vals)
        }

        Num(_) | Pi | Ans => Err(ErreurCalc::syntaxe("feuille inattendue")),
    }
}

fn depiler(valeurs: &mut Vec<f64>) -> Resultat<f64> {
    valeurs
        .pop()
        .ok_or_else(|| ErreurCalc::syntaxe("opérande manquante"))
}

/// Libération sans récursion : un arbre très profond (longue somme)
/// ne doit pas épuiser la pile au moment du drop non plus.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut a_liberer: Vec<Expr> = Vec::new();
        detacher(self, &mut a_liberer);
        while let Some(mut e) = a_liberer.pop() {
            detacher(&mut e, &mut a_liberer);
        }
    }
}

/// Sort les enfants de `e` (remplacés par des feuilles).
fn detacher(e: &mut Expr, sortie: &mut Vec<Expr>) {
    use std::mem::replace;
    use Expr::*;

    match e {
        Neg(x) => sortie.push(replace(&mut **x, Pi)),
        Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
            sortie.push(replace(&mut **a, Pi));
            sortie.push(replace(&mut **b, Pi));
        }
        Appel(_, args) => sortie.append(args),
        Num(_) | Pi | Ans => {}
    }
}

fn appliquer(f: Fonction, args: &[f64]) -> Resultat<f64> {
    let arg = |k: usize| {
        args.get(k)
            .copied()
            .ok_or_else(|| ErreurCalc::syntaxe(format!("{} : argument manquant", f.nom())))
    };

    let v = match f {
        Fonction::Factorielle => return factorial(arg(0)?),
        Fonction::Npr => return npr(arg(0)?, arg(1)?),
        Fonction::Ncr => return ncr(arg(0)?, arg(1)?),

        Fonction::Sqrt => arg(0)?.sqrt(),
        Fonction::Exp => arg(0)?.exp(),
        Fonction::Log10 => arg(0)?.log10(),
        Fonction::Ln => arg(0)?.ln(),
        Fonction::Sin => arg(0)?.sin(),
        Fonction::Cos => arg(0)?.cos(),
        Fonction::Tan => arg(0)?.tan(),
        Fonction::Asin => arg(0)?.asin(),
        Fonction::Acos => arg(0)?.acos(),
        Fonction::Atan => arg(0)?.atan(),
        Fonction::Sinh => arg(0)?.sinh(),
        Fonction::Cosh => arg(0)?.cosh(),
        Fonction::Tanh => arg(0)?.tanh(),
    };
    fini(v, f.nom())
}
