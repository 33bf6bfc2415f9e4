// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok (déjà équilibrée, complétée, développée) en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Func(f) doit être suivie de '(' ; l’arité est vérifiée à la ')' correspondante
// - ',' seulement à l’intérieur des parenthèses d’une fonction
// - Moins unaire => Tok::Neg (précédence entre * / et ^) : -2^2 = -4, 2*-3 = -6
// - Plus unaire ignoré
// - Toute marque restante (! P C %) ou jeton inconnu => erreur de syntaxe
//
// NOTE:
// - C’est ici (et seulement ici) que la liste blanche est appliquée :
//   rien d’autre que nombres, π, Ans, + - * / ^ et les fonctions connues n’atteint l’AST.

use tracing::debug;

use super::erreur::{ErreurCalc, Resultat};
use super::expr::Expr;
use super::jetons::{format_tokens, Fonction, Tok};

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Une paire de parenthèses ouverte : appartient-elle à une fonction ?
struct Cadre {
    fonction: Option<Fonction>,
    virgules: usize,
}

fn manquante(quoi: &str) -> ErreurCalc {
    ErreurCalc::syntaxe(format!("opérande manquante {quoi}"))
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Func(Sin), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Func(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    if tokens.is_empty() {
        return Err(ErreurCalc::syntaxe("entrée vide"));
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();
    let mut cadres: Vec<Cadre> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les opérandes manquantes.
    let mut prev_was_value = false;
    // fonction vue, en attente de sa '('
    let mut attend_par: Option<Fonction> = None;

    for tok in tokens.iter().cloned() {
        if let Some(f) = attend_par {
            if tok != Tok::LPar {
                return Err(ErreurCalc::syntaxe(format!(
                    "{} doit être suivie de '('",
                    f.nom()
                )));
            }
        }

        match tok {
            Tok::Num(_) | Tok::Pi | Tok::Ans => {
                if prev_was_value {
                    return Err(ErreurCalc::syntaxe(format!("opérateur manquant avant {tok}")));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Func(f) => {
                if prev_was_value {
                    return Err(ErreurCalc::syntaxe(format!(
                        "opérateur manquant avant {}",
                        f.nom()
                    )));
                }
                // fonction : on la garde sur la pile (elle sortira après sa ')')
                ops.push(Tok::Func(f));
                attend_par = Some(f);
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurCalc::syntaxe("opérateur manquant avant '('"));
                }
                cadres.push(Cadre {
                    fonction: attend_par.take(),
                    virgules: 0,
                });
                ops.push(Tok::LPar);
                prev_was_value = false;
            }

            Tok::Comma => {
                let dans_fonction = cadres.last().is_some_and(|c| c.fonction.is_some());
                if !dans_fonction {
                    return Err(ErreurCalc::syntaxe("',' hors d’un appel de fonction"));
                }
                if !prev_was_value {
                    return Err(manquante("avant ','"));
                }
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }
                if let Some(c) = cadres.last_mut() {
                    c.virgules += 1;
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                let cadre = cadres
                    .pop()
                    .ok_or_else(|| ErreurCalc::syntaxe("parenthèse fermante en trop"))?;
                if !prev_was_value {
                    return Err(manquante("avant ')'"));
                }

                // dépile jusqu’à '('
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    out.push(top);
                }

                // si la parenthèse appartient à une fonction : arité, puis on la sort
                if let Some(f) = cadre.fonction {
                    let recus = cadre.virgules + 1;
                    if recus != f.arite() {
                        return Err(ErreurCalc::syntaxe(format!(
                            "{} attend {} argument(s), reçu {recus}",
                            f.nom(),
                            f.arite()
                        )));
                    }
                    if let Some(func) = ops.pop() {
                        out.push(func);
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // signe unaire : '+' ignoré, '-' => Neg (préfixe : ne dépile rien)
                if tok == Tok::Minus {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(manquante(&format!("avant '{tok}'")));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Bang | Tok::PermMark | Tok::CombMark | Tok::Percent => {
                return Err(ErreurCalc::syntaxe(format!(
                    "'{tok}' attend une opérande littérale"
                )));
            }

            Tok::Neg => return Err(ErreurCalc::syntaxe("jeton interne inattendu")),

            Tok::Unknown(s) => {
                return Err(ErreurCalc::syntaxe(format!("jeton inconnu : {s}")));
            }
        }
    }

    if let Some(f) = attend_par {
        return Err(ErreurCalc::syntaxe(format!("{} sans argument", f.nom())));
    }
    if !prev_was_value {
        return Err(ErreurCalc::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalc::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    debug!(rpn = %format_tokens(&out), "shunting-yard");
    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Resultat<Expr> {
    let invalide = || ErreurCalc::syntaxe("expression invalide");
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Num(v)),
            Tok::Pi => st.push(Expr::Pi),
            Tok::Ans => st.push(Expr::Ans),

            Tok::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = Box::new(st.pop().ok_or_else(invalide)?);
                let a = Box::new(st.pop().ok_or_else(invalide)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push(e);
            }

            Tok::Func(f) => {
                let n = f.arite();
                if st.len() < n {
                    return Err(invalide());
                }
                let args = st.split_off(st.len() - n);
                st.push(Expr::Appel(f, args));
            }

            _ => return Err(ErreurCalc::syntaxe(format!("jeton inattendu en RPN : {tok}"))),
        }
    }

    if st.len() != 1 {
        return Err(invalide());
    }
    st.pop().ok_or_else(invalide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::normalize;

    fn rpn(s: &str) -> String {
        format_tokens(&to_rpn(&normalize(s)).unwrap_or_else(|e| panic!("{s:?}: {e}")))
    }

    fn val(s: &str) -> f64 {
        let r = to_rpn(&normalize(s)).unwrap();
        from_rpn(&r).unwrap().eval(0.0).unwrap()
    }

    fn syntaxe(s: &str) {
        assert!(
            matches!(to_rpn(&normalize(s)), Err(ErreurCalc::Syntaxe(_))),
            "attendu erreur de syntaxe pour {s:?}"
        );
    }

    #[test]
    fn precedences() {
        assert_eq!(rpn("1+2*3"), "1 2 3 * +");
        assert_eq!(rpn("2^3^2"), "2 3 2 ^ ^");
        assert_eq!(rpn("sin(pi/2)"), "π 2 / sin");
        assert_eq!(val("2^3^2"), 512.0);
        assert_eq!(val("10-4-3"), 3.0);
        assert_eq!(val("100/10/5"), 2.0);
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(val("-2^2"), -4.0);
        assert_eq!(val("2*-3"), -6.0);
        assert_eq!(val("--3"), 3.0);
        assert_eq!(val("2^-1"), 0.5);
        assert_eq!(val("+5"), 5.0);
        assert_eq!(val("(-2)^2"), 4.0);
    }

    #[test]
    fn fonctions_a_deux_arguments() {
        assert_eq!(rpn("nPr(5,2)"), "5 2 nPr");
        assert_eq!(val("nCr(5,2)+1"), 11.0);
        assert_eq!(val("nPr(2+3,1+1)"), 20.0);
    }

    #[test]
    fn erreurs_de_syntaxe() {
        syntaxe("");
        syntaxe("1+");
        syntaxe("*2");
        syntaxe("()");
        syntaxe("1+2)");
        syntaxe("(1+2");
        syntaxe("sin 30");
        syntaxe("sin(1,2)");
        syntaxe("nCr(5)");
        syntaxe("(1,2)");
        syntaxe("(2+3)!");
        syntaxe("foo(2)");
        syntaxe("2 3");
    }
}
