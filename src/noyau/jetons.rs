// src/noyau/jetons.rs
//
// Tokenisation + normalisation (glyphes calculatrice -> grammaire interne).
// Jamais d’erreur ici : ce qui n’est pas reconnu devient Tok::Unknown
// et sera refusé plus tard par l’évaluateur (erreur de syntaxe).

use std::fmt;

use tracing::debug;

/// Fonctions de la liste blanche.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Exp,
    Log10,
    Ln,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Factorielle,
    Npr,
    Ncr,
}

impl Fonction {
    /// Identifiant (déjà en minuscules) -> fonction, si elle est dans la liste blanche.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        let f = match nom {
            "sqrt" => Fonction::Sqrt,
            "exp" => Fonction::Exp,
            "log" | "log10" => Fonction::Log10,
            "ln" => Fonction::Ln,
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "asin" => Fonction::Asin,
            "acos" => Fonction::Acos,
            "atan" => Fonction::Atan,
            "sinh" => Fonction::Sinh,
            "cosh" => Fonction::Cosh,
            "tanh" => Fonction::Tanh,
            "factorial" => Fonction::Factorielle,
            "npr" => Fonction::Npr,
            "ncr" => Fonction::Ncr,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Exp => "exp",
            Fonction::Log10 => "log",
            Fonction::Ln => "ln",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sinh => "sinh",
            Fonction::Cosh => "cosh",
            Fonction::Tanh => "tanh",
            Fonction::Factorielle => "factorial",
            Fonction::Npr => "nPr",
            Fonction::Ncr => "nCr",
        }
    }

    /// Nombre d’arguments attendus entre les parenthèses.
    pub fn arite(self) -> usize {
        match self {
            Fonction::Npr | Fonction::Ncr => 2,
            _ => 1,
        }
    }

    /// Trig directe : seule concernée par la conversion degrés -> radians.
    pub fn est_trig_directe(self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    Ans,

    Func(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    /// Moins unaire : produit seulement par to_rpn (jamais par la tokenisation).
    Neg,

    LPar,
    RPar,
    Comma,

    // Sucre calculatrice (résolu avant l’évaluation)
    Percent,
    Bang,     // n!
    PermMark, // nPr
    CombMark, // nCr

    /// Texte non reconnu (passe tel quel, refusé à l’évaluation).
    Unknown(String),
}

impl Tok {
    /// Fin d’une valeur : nombre, constante ou parenthèse fermante.
    pub fn termine_valeur(&self) -> bool {
        matches!(self, Tok::Num(_) | Tok::Pi | Tok::Ans | Tok::RPar)
    }

    /// Début d’une valeur : nombre, constante, fonction ou parenthèse ouvrante.
    pub fn commence_valeur(&self) -> bool {
        matches!(
            self,
            Tok::Num(_) | Tok::Pi | Tok::Ans | Tok::Func(_) | Tok::LPar
        )
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Pi => f.write_str("π"),
            Tok::Ans => f.write_str("Ans"),
            Tok::Func(fonction) => f.write_str(fonction.nom()),

            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::Caret => f.write_str("^"),
            Tok::Neg => f.write_str("neg"),

            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Comma => f.write_str(","),

            Tok::Percent => f.write_str("%"),
            Tok::Bang => f.write_str("!"),
            Tok::PermMark => f.write_str("P"),
            Tok::CombMark => f.write_str("C"),

            Tok::Unknown(s) => write!(f, "?{s}"),
        }
    }
}

/// Tokenize une chaîne évaluable en jetons (sans normaliser le %).
/// Supporte:
/// - nombres décimaux (12, 0.5, .5) ; "1.2.3" -> Unknown
/// - opérateurs + - * / ^ ** et glyphes × ÷ − ²
/// - parenthèses, virgule (séparateur d’arguments)
/// - π ou pi, ans
/// - √ (équivaut à sqrt)
/// - marques ! P C
/// - identifiants [a-z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Vec<Tok> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '%' => Some(Tok::Percent),
            '!' => Some(Tok::Bang),
            'P' => Some(Tok::PermMark),
            'C' => Some(Tok::CombMark),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Func(Fonction::Sqrt)),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(tok);
            i += 1;
            continue;
        }

        // '*' ou '**'
        if c == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                out.push(Tok::Caret);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        // Carré en exposant : ² => ^2
        if c == '²' {
            out.push(Tok::Caret);
            out.push(Tok::Num(2.0));
            i += 1;
            continue;
        }

        // Identifiants : [a-z_][a-zA-Z0-9_]*
        if c.is_ascii_lowercase() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            let tok = match w.as_str() {
                "pi" => Tok::Pi,
                "ans" => Tok::Ans,
                _ => match Fonction::depuis_nom(&w) {
                    Some(f) => Tok::Func(f),
                    None => Tok::Unknown(word),
                },
            };
            out.push(tok);
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let lit: String = chars[start..i].iter().collect();
            match lit.parse::<f64>() {
                Ok(v) => out.push(Tok::Num(v)),
                Err(_) => out.push(Tok::Unknown(lit)),
            }
            continue;
        }

        out.push(Tok::Unknown(c.to_string()));
        i += 1;
    }

    out
}

/// Résout le pourcentage : « divisé par 100 » appliqué à l’atome numérique qui précède.
/// - littéral n juste avant : n% => (n/100)
/// - sinon : % => /100
fn resoudre_pourcent(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());

    for tok in tokens {
        if tok != Tok::Percent {
            out.push(tok);
            continue;
        }

        match out.last() {
            Some(Tok::Num(n)) => {
                let n = *n;
                out.pop();
                out.extend([Tok::LPar, Tok::Num(n), Tok::Slash, Tok::Num(100.0), Tok::RPar]);
            }
            _ => out.extend([Tok::Slash, Tok::Num(100.0)]),
        }
    }

    out
}

/// Étape 1 du pipeline : chaîne évaluable -> flux de jetons normalisé.
pub fn normalize(s: &str) -> Vec<Tok> {
    let out = resoudre_pourcent(tokenize(s));
    debug!(jetons = %format_tokens(&out), "normalisation");
    out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
