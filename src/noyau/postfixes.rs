// src/noyau/postfixes.rs
//
// Développement des marques calculatrice en appels explicites :
//   n!   => factorial(n)
//   nPr  => nPr(n,r)
//   nCr  => nCr(n,r)
//
// Seuls les littéraux numériques sont reconnus comme opérandes.
// "(2+3)!" n’est PAS développé : la marque reste et l’évaluateur la refuse.

use super::jetons::{Fonction, Tok};

fn appel(f: Fonction, args: &[f64]) -> Vec<Tok> {
    let mut out = vec![Tok::Func(f), Tok::LPar];
    for (k, a) in args.iter().enumerate() {
        if k > 0 {
            out.push(Tok::Comma);
        }
        out.push(Tok::Num(*a));
    }
    out.push(Tok::RPar);
    out
}

/// n! => factorial(n)
fn developper_factorielles(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());

    for tok in tokens {
        if let (Tok::Bang, Some(Tok::Num(n))) = (&tok, out.last()) {
            let n = *n;
            out.pop();
            out.extend(appel(Fonction::Factorielle, &[n]));
            continue;
        }
        out.push(tok);
    }
    out
}

/// nXr => f(n,r) pour la marque donnée (P ou C).
fn developper_infixe(tokens: Vec<Tok>, marque: &Tok, f: Fonction) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];
        if tok == marque {
            if let (Some(Tok::Num(n)), Some(Tok::Num(r))) = (out.last(), tokens.get(i + 1)) {
                let (n, r) = (*n, *r);
                out.pop();
                out.extend(appel(f, &[n, r]));
                i += 2;
                continue;
            }
        }
        out.push(tok.clone());
        i += 1;
    }
    out
}

/// Les trois passes, dans l’ordre ! puis P puis C.
pub fn developper(tokens: Vec<Tok>) -> Vec<Tok> {
    let t = developper_factorielles(tokens);
    let t = developper_infixe(t, &Tok::PermMark, Fonction::Npr);
    developper_infixe(t, &Tok::CombMark, Fonction::Ncr)
}
