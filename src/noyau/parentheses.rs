// src/noyau/parentheses.rs
//
// Équilibrage : ajoute les ')' manquants en fin d’entrée.
// Ne retire jamais une ')' en trop (l’évaluateur la refusera).

use super::jetons::Tok;

/// Complète avec des ')' jusqu’à égalité des comptes.
pub fn balance(mut tokens: Vec<Tok>) -> Vec<Tok> {
    let ouvertes = tokens.iter().filter(|t| matches!(t, Tok::LPar)).count();
    let fermees = tokens.iter().filter(|t| matches!(t, Tok::RPar)).count();

    for _ in fermees..ouvertes {
        tokens.push(Tok::RPar);
    }
    tokens
}
