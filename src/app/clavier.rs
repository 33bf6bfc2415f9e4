// src/app/clavier.rs
//
// Clavier -> Action (pur, sans egui).
// Les noms de touches suivent ceux du navigateur : "Enter", "Backspace", ou le caractère tapé.

use crate::noyau::{Entree, Operateur};

use super::etat::Action;

pub fn action_clavier(touche: &str) -> Option<Action> {
    match touche {
        "Enter" | "=" => Some(Action::Evaluer),
        "Backspace" => Some(Action::EffacerDernier),
        "c" | "C" => Some(Action::Effacer),
        _ => {
            let mut chars = touche.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            entree_caractere(c).map(Action::Saisir)
        }
    }
}

fn entree_caractere(c: char) -> Option<Entree> {
    match c {
        '+' => Some(Entree::operateur(Operateur::Plus)),
        '-' => Some(Entree::operateur(Operateur::Moins)),
        '*' => Some(Entree::operateur(Operateur::Fois)),
        '/' => Some(Entree::operateur(Operateur::Divise)),
        '(' => Some(Entree::par_ouvrante()),
        ')' => Some(Entree::par_fermante()),
        _ => Entree::chiffre(c),
    }
}
