//! Tests scientifiques (campagne) : propriétés attendues du moteur, bout en bout.
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Mode DEG par défaut : seuls sin/cos/tan convertissent leur argument.
//!   asin/acos/atan rendent des radians dans les deux modes.
//! - "(2+3)!" n’est pas développé (opérande non littérale) : erreur de syntaxe.
//!   Le bouton n! de la session, lui, accepte toute expression.
//! - Arrondi à 10 décimales : les comparaisons « exactes » ci-dessous en dépendent.

use std::time::{Duration, Instant};

use super::contexte::{Contexte, ModeAngle};
use super::erreur::ErreurCalc;
use super::eval::evaluate;

fn deg() -> Contexte {
    Contexte::default()
}

fn rad() -> Contexte {
    Contexte {
        mode_angle: ModeAngle::Radian,
        ..Contexte::default()
    }
}

fn eval_ok(expr: &str, ctx: &Contexte) -> f64 {
    evaluate(expr, ctx).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_val(expr: &str, attendu: f64) {
    assert_eq!(eval_ok(expr, &deg()), attendu, "expr={expr:?}");
}

fn assert_domaine(expr: &str) {
    let r = evaluate(expr, &deg());
    assert!(matches!(r, Err(ErreurCalc::Domaine(_))), "expr={expr:?} => {r:?}");
}

fn assert_syntaxe(expr: &str) {
    let r = evaluate(expr, &deg());
    assert!(matches!(r, Err(ErreurCalc::Syntaxe(_))), "expr={expr:?} => {r:?}");
}

fn assert_numerique(expr: &str) {
    let r = evaluate(expr, &deg());
    assert!(matches!(r, Err(ErreurCalc::Numerique(_))), "expr={expr:?} => {r:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arithmétique entière ------------------------ */

#[test]
fn sci_arithmetique_entiere_exacte() {
    let t0 = Instant::now();
    // grille bornée : a op b pour a, b ∈ [-12, 12]
    for a in -12i64..=12 {
        for b in -12i64..=12 {
            let (fa, fb) = (a as f64, b as f64);
            let pa = if a < 0 { format!("({a})") } else { a.to_string() };
            let pb = if b < 0 { format!("({b})") } else { b.to_string() };

            assert_val(&format!("{pa}+{pb}"), fa + fb);
            assert_val(&format!("{pa}-{pb}"), fa - fb);
            assert_val(&format!("{pa}*{pb}"), fa * fb);
            if b != 0 {
                let q = eval_ok(&format!("{pa}/{pb}"), &deg());
                assert!((q - fa / fb).abs() <= 1e-10, "{a}/{b} => {q}");
            } else {
                assert_numerique(&format!("{pa}/{pb}"));
            }
        }
        budget(t0, Duration::from_secs(5));
    }
}

#[test]
fn sci_precedence_et_parentheses() {
    assert_val("1+2*3", 7.0);
    assert_val("(1+2)*3", 9.0);
    assert_val("2*3^2", 18.0);
    assert_val("-2^2", -4.0);
    assert_val("2*-3", -6.0);
    assert_val("100-10*3+4/2", 72.0);
    assert_val("0.1+0.2", 0.3);
}

/* ------------------------ Combinatoire ------------------------ */

#[test]
fn sci_factorielles_0_a_10() {
    let suite = [1, 1, 2, 6, 24, 120, 720, 5040, 40320, 362880, 3628800];
    for (n, v) in suite.iter().enumerate() {
        assert_val(&format!("{n}!"), *v as f64);
        assert_val(&format!("factorial({n})"), *v as f64);
    }
}

#[test]
fn sci_factorielle_hors_domaine() {
    assert_domaine("factorial(-1)");
    assert_domaine("factorial(2.5)");
    assert_domaine("2.5!");
}

#[test]
fn sci_permutations_combinaisons() {
    assert_val("5P2", 20.0);
    assert_val("5C2", 10.0);
    assert_val("nPr(5,2)", 20.0);
    assert_val("nCr(5,2)", 10.0);
    assert_domaine("nCr(2,5)");
    assert_domaine("2C5");
    assert_domaine("nPr(2,5)");
}

#[test]
fn sci_operande_parenthesee_non_developpee() {
    assert_syntaxe("(2+3)!");
    assert_syntaxe("(5)P2");
}

/* ------------------------ Angles ------------------------ */

#[test]
fn sci_degres() {
    assert_eq!(eval_ok("sin(90)", &deg()), 1.0);
    assert_eq!(eval_ok("cos(0)", &deg()), 1.0);
    assert_eq!(eval_ok("cos(90)", &deg()), 0.0);
    assert_eq!(eval_ok("sin(30)", &deg()), 0.5);
    assert_eq!(eval_ok("tan(45)", &deg()), 1.0);
    assert_eq!(eval_ok("sin(180)", &deg()), 0.0);
    // tout l’argument est converti
    assert_eq!(eval_ok("sin(30+60)", &deg()), 1.0);
}

#[test]
fn sci_radians() {
    assert_eq!(eval_ok("sin(π/2)", &rad()), 1.0);
    assert_eq!(eval_ok("sin(pi/2)", &rad()), 1.0);
    assert_eq!(eval_ok("cos(pi)", &rad()), -1.0);
    assert_eq!(eval_ok("sin(0)", &rad()), 0.0);
}

#[test]
fn sci_trig_inverse_non_convertie() {
    // asin rend des radians, même en mode DEG
    let v = eval_ok("asin(1)", &deg());
    assert_eq!(v, eval_ok("asin(1)", &rad()));
    assert_eq!(v, 1.5707963268);
}

#[test]
fn sci_bascule_ne_touche_pas_la_memoire() {
    let mut ctx = deg();
    ctx.memoire = 12.5;
    ctx.dernier_resultat = 3.0;
    ctx.basculer_mode_angle();
    assert_eq!(ctx.memoire, 12.5);
    assert_eq!(ctx.dernier_resultat, 3.0);
    assert_eq!(eval_ok("sin(pi/2)", &ctx), 1.0);
}

/* ------------------------ Parenthèses ------------------------ */

#[test]
fn sci_equilibrage() {
    assert_val("(1+2", 3.0);
    assert_val("((1+2)*(3", 9.0);
    assert_val("sqrt(16", 4.0);
    // excès : jamais corrigé
    assert_syntaxe("1+2)");
}

/* ------------------------ Numérique ------------------------ */

#[test]
fn sci_erreurs_numeriques() {
    assert_numerique("1/0");
    assert_numerique("0/0");
    assert_numerique("sqrt(-1)");
    assert_numerique("ln(0)");
    assert_numerique("log(-10)");
    assert_numerique("10^400");
    assert_numerique("171!");
}

#[test]
fn sci_liste_blanche() {
    assert_syntaxe("alert(1)");
    assert_syntaxe("Math.sin(1)");
    assert_syntaxe("2;3");
    assert_syntaxe("x+1");
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    for profondeur in [1usize, 10, 50, 200] {
        let s = format!("{}1{}", "(".repeat(profondeur), ")".repeat(profondeur));
        assert_val(&s, 1.0);
        // même chose sans fermer : l’équilibrage complète
        let s = format!("{}2", "(".repeat(profondeur));
        assert_val(&s, 2.0);
        budget(t0, Duration::from_secs(2));
    }
}

#[test]
fn sci_arrondi_grandes_valeurs() {
    assert_val("1000000/7", 142857.1428571429);
    assert_val("123456.1+0.2", 123456.3);
    assert_val("1000000/3", 333333.3333333333);
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let s = vec!["1"; 2000].join("+");
    assert_val(&s, 2000.0);
    let s = vec!["1"; 20_000].join("-");
    assert_val(&s, -19_998.0);
    // puissance associative à droite : arbre penché dans l’autre sens
    let s = vec!["1"; 5000].join("^");
    assert_val(&s, 1.0);
    budget(t0, Duration::from_secs(2));
}
