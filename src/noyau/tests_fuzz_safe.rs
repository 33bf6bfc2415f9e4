//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : un résultat est toujours fini et déjà normalisé ;
//!   sinon c’est une des trois erreurs typées (jamais de panique)

use std::time::{Duration, Instant};

use super::contexte::{Contexte, ModeAngle};
use super::eval::evaluate;
use super::lecture::normaliser;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(10)),
        3 => format!("{}", rng.pick(1000)),
        4 => "π".to_string(),
        _ => format!("{}", rng.pick(13)),
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return gen_nombre(rng);
    }
    let p = profondeur - 1;
    match rng.pick(12) {
        0 => format!("{}+{}", gen_expr(rng, p), gen_expr(rng, p)),
        1 => format!("{}-{}", gen_expr(rng, p), gen_expr(rng, p)),
        2 => format!("{}×{}", gen_expr(rng, p), gen_expr(rng, p)),
        3 => format!("{}÷{}", gen_expr(rng, p), gen_expr(rng, p)),
        4 => format!("({})^{}", gen_expr(rng, p), rng.pick(4)),
        5 => {
            let f = ["sin", "cos", "tan", "sqrt", "ln", "log", "exp", "asin"][rng.pick(8) as usize];
            format!("{f}({})", gen_expr(rng, p))
        }
        6 => format!("{}!", rng.pick(12)),
        7 => format!("{}P{}", rng.pick(9), rng.pick(9)),
        8 => format!("{}C{}", rng.pick(9), rng.pick(9)),
        9 => format!("{}%", gen_nombre(rng)),
        10 => format!("{}({})", gen_nombre(rng), gen_expr(rng, p)),
        // parenthèse non fermée : l’équilibrage doit la compléter
        _ => format!("({}", gen_expr(rng, p)),
    }
}

/// Bruit pur : caractères au hasard, y compris hors grammaire.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '1', '2', '0', '.', '+', '-', '*', '/', '^', '(', ')', '!', 'P', 'C', '%', ',', '×', '÷',
        's', 'i', 'n', 'x', '#', ' ', 'π', '²',
    ];
    let n = 1 + rng.pick(24);
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn verifier(expr: &str, ctx: &Contexte) {
    match evaluate(expr, ctx) {
        Ok(v) => {
            assert!(v.is_finite(), "expr={expr:?} => {v}");
            assert_eq!(normaliser(v, &ctx.arrondi), v, "non normalisé: expr={expr:?}");
        }
        Err(_) => {
            // toute ErreurCalc est acceptable : l’important est l’absence de panique
        }
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_expressions_generees() {
    let t0 = Instant::now();
    let mut rng = Rng::new(0x5EED_CA1C);

    for k in 0..1500 {
        let ctx = Contexte {
            mode_angle: if rng.coin() {
                ModeAngle::Degre
            } else {
                ModeAngle::Radian
            },
            ..Contexte::default()
        };
        let profondeur = 1 + rng.pick(4);
        let e = gen_expr(&mut rng, profondeur);
        verifier(&e, &ctx);

        if k % 100 == 0 {
            budget(t0, Duration::from_secs(5));
        }
    }
}

#[test]
fn fuzz_bruit_sans_panique() {
    let t0 = Instant::now();
    let mut rng = Rng::new(42);

    for k in 0..3000 {
        let e = gen_bruit(&mut rng);
        verifier(&e, &Contexte::default());

        if k % 200 == 0 {
            budget(t0, Duration::from_secs(5));
        }
    }
}

#[test]
fn fuzz_determinisme() {
    let mut rng = Rng::new(7);
    let ctx = Contexte::default();

    for _ in 0..300 {
        let e = gen_expr(&mut rng, 3);
        assert_eq!(evaluate(&e, &ctx), evaluate(&e, &ctx), "expr={e:?}");
    }
}
