//! Saisie : l’expression construite touche par touche.
//!
//! Chaque touche produit une `Entree` qui porte à la fois son glyphe d’affichage
//! et son fragment évaluable. L’affichage et la source sont donc toujours dérivés
//! de la même suite d’entrées : « effacer le dernier » retire une touche entière
//! des deux côtés à la fois.

use super::jetons::Fonction;
use super::lecture::format_resultat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entree {
    affichage: String,
    source: String,
}

impl Entree {
    fn paire(affichage: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            affichage: affichage.into(),
            source: source.into(),
        }
    }

    fn meme(texte: impl Into<String>) -> Self {
        let t = texte.into();
        Self::paire(t.clone(), t)
    }

    /// Chiffre 0-9 ou point décimal. `None` pour tout autre caractère.
    pub fn chiffre(c: char) -> Option<Self> {
        (c.is_ascii_digit() || c == '.').then(|| Self::meme(c.to_string()))
    }

    pub fn operateur(op: Operateur) -> Self {
        match op {
            Operateur::Plus => Self::meme("+"),
            Operateur::Moins => Self::meme("-"),
            Operateur::Fois => Self::paire("×", "*"),
            Operateur::Divise => Self::paire("÷", "/"),
        }
    }

    pub fn puissance() -> Self {
        Self::meme("^")
    }

    /// Ouvre l’appel : la source contient toujours la '('.
    pub fn fonction(f: Fonction) -> Self {
        let source = format!("{}(", f.nom());
        let affichage = match f {
            Fonction::Sin | Fonction::Cos | Fonction::Tan => format!("{} ", f.nom()),
            Fonction::Sqrt => "√".to_string(),
            Fonction::Exp => "e^".to_string(),
            Fonction::Log10 | Fonction::Ln => f.nom().to_string(),
            _ => source.clone(),
        };
        Self::paire(affichage, source)
    }

    pub fn par_ouvrante() -> Self {
        Self::meme("(")
    }

    pub fn par_fermante() -> Self {
        Self::meme(")")
    }

    pub fn virgule() -> Self {
        Self::meme(",")
    }

    pub fn pourcent() -> Self {
        Self::meme("%")
    }

    pub fn factorielle() -> Self {
        Self::meme("!")
    }

    pub fn permutation() -> Self {
        Self::meme("P")
    }

    pub fn combinaison() -> Self {
        Self::meme("C")
    }

    pub fn pi() -> Self {
        Self::meme("π")
    }

    /// L’espace final sépare l’identifiant d’un chiffre tapé ensuite (« Ans2 »).
    pub fn ans() -> Self {
        Self::paire("Ans", "ans ")
    }

    /// Valeur numérique insérée telle quelle (rappel mémoire, résultat enchaîné).
    /// Négatif : source entre parenthèses, pour que `^`, `!` ou `%` tapés
    /// ensuite portent sur la valeur entière (`(-3)^2` et non `-(3^2)`).
    pub fn nombre(v: f64) -> Self {
        let texte = format_resultat(v);
        if v < 0.0 {
            let source = format!("({texte})");
            Self::paire(texte, source)
        } else {
            Self::meme(texte)
        }
    }

    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expression {
    entrees: Vec<Entree>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression réduite à un résultat (calcul enchaîné : expression = résultat).
    pub fn depuis_resultat(v: f64) -> Self {
        Self {
            entrees: vec![Entree::nombre(v)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Texte affiché (glyphes × ÷ √ …).
    pub fn affichage(&self) -> String {
        self.entrees.iter().map(Entree::affichage).collect()
    }

    /// Texte évaluable (grammaire du noyau).
    pub fn source(&self) -> String {
        self.entrees.iter().map(Entree::source).collect()
    }
}

/// Ajout pur : l’expression existante n’est pas modifiée.
pub fn append_token(existante: &Expression, entree: Entree) -> Expression {
    let mut entrees = existante.entrees.clone();
    entrees.push(entree);
    Expression { entrees }
}

/// Troncature pure d’une entrée logique (sans effet sur une expression vide).
pub fn delete_last(existante: &Expression) -> Expression {
    let mut entrees = existante.entrees.clone();
    entrees.pop();
    Expression { entrees }
}
