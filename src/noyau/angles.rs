// src/noyau/angles.rs
//
// Mode DEG : sin(x), cos(x), tan(x) => sin(π/180*(x)), …
// Tout l’argument est converti, pas seulement son premier terme.
// asin/acos/atan et sinh/cosh/tanh ne sont PAS touchées (asymétrie assumée).

use super::contexte::ModeAngle;
use super::jetons::Tok;

pub fn convertir_degres(tokens: Vec<Tok>, mode: ModeAngle) -> Vec<Tok> {
    if mode == ModeAngle::Radian {
        return tokens;
    }

    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() + 8);
    // une entrée par '(' ouverte : true si elle doit recevoir une ')' de plus
    let mut pile: Vec<bool> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];
        match tok {
            Tok::Func(f) if f.est_trig_directe() && tokens.get(i + 1) == Some(&Tok::LPar) => {
                out.extend([
                    tok.clone(),
                    Tok::LPar,
                    Tok::Pi,
                    Tok::Slash,
                    Tok::Num(180.0),
                    Tok::Star,
                    Tok::LPar,
                ]);
                pile.push(true);
                i += 2;
                continue;
            }
            Tok::LPar => {
                pile.push(false);
                out.push(Tok::LPar);
            }
            Tok::RPar => {
                if pile.pop() == Some(true) {
                    out.push(Tok::RPar);
                }
                out.push(Tok::RPar);
            }
            _ => out.push(tok.clone()),
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::{format_tokens, normalize};

    fn deg(s: &str) -> String {
        format_tokens(&convertir_degres(normalize(s), ModeAngle::Degre))
    }

    #[test]
    fn trig_directe_convertie() {
        assert_eq!(deg("sin(90)"), "sin ( π / 180 * ( 90 ) )");
        assert_eq!(deg("cos(30+60)"), "cos ( π / 180 * ( 30 + 60 ) )");
    }

    #[test]
    fn imbrication() {
        assert_eq!(
            deg("sin(cos(0)*90)"),
            "sin ( π / 180 * ( cos ( π / 180 * ( 0 ) ) * 90 ) )"
        );
        assert_eq!(deg("tan((45))"), "tan ( π / 180 * ( ( 45 ) ) )");
    }

    #[test]
    fn trig_inverse_et_hyperbolique_intactes() {
        assert_eq!(deg("asin(1)"), "asin ( 1 )");
        assert_eq!(deg("sinh(1)"), "sinh ( 1 )");
    }

    #[test]
    fn radian_sans_effet() {
        let t = normalize("sin(1)");
        assert_eq!(convertir_degres(t.clone(), ModeAngle::Radian), t);
    }
}
