// src/noyau/implicite.rs
//
// Multiplication implicite : 2(3+4) => 2*(3+4), (1+2)(3+4) => (1+2)*(3+4), (1+2)3 => (1+2)*3.
// Passe appliquée AVANT le développement des marques ! P C.

use super::jetons::Tok;

pub fn inserer_multiplications(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() + 4);

    for tok in tokens {
        if let Some(prev) = out.last() {
            // deux littéraux collés ne peuvent pas venir de la saisie (les chiffres fusionnent) :
            // on laisse l’évaluateur les refuser
            let deux_nombres = matches!((prev, &tok), (Tok::Num(_), Tok::Num(_)));
            if prev.termine_valeur() && tok.commence_valeur() && !deux_nombres {
                out.push(Tok::Star);
            }
        }
        out.push(tok);
    }

    out
}
