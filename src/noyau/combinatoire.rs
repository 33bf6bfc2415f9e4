// src/noyau/combinatoire.rs
//
// factorial / nPr / nCr.
// Calcul exact en BigUint, conversion f64 à la fin (dépassement => erreur numérique).

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::erreur::{fini, ErreurCalc, Resultat};

/// 171! dépasse f64::MAX : inutile de multiplier plus loin.
const FACTORIELLE_MAX: u64 = 170;

/// C(2k, k) ≥ 4^k / (2√k) : au-delà de k = 1100 le résultat ne tient plus dans un f64.
const COMBINAISON_K_MAX: u64 = 1100;

/// Opérande entière naturelle, sinon erreur de domaine.
fn entier_naturel(x: f64, quoi: &str) -> Resultat<u64> {
    if !x.is_finite() || x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurCalc::domaine(format!(
            "{quoi} : {x} n’est pas un entier naturel"
        )));
    }
    if x > u64::MAX as f64 {
        return Err(ErreurCalc::numerique(format!("{quoi} : opérande trop grande")));
    }
    Ok(x as u64)
}

/// Produit lo·(lo+1)·…·hi (1 si intervalle vide).
fn produit(lo: u64, hi: u64) -> BigUint {
    let mut acc = BigUint::one();
    for k in lo.max(2)..=hi {
        acc *= k;
    }
    acc
}

fn vers_f64(v: &BigUint, quoi: &str) -> Resultat<f64> {
    let x = v
        .to_f64()
        .ok_or_else(|| ErreurCalc::numerique(format!("{quoi} : dépassement")))?;
    fini(x, quoi)
}

/// n! pour n entier naturel.
pub fn factorial(n: f64) -> Resultat<f64> {
    let n = entier_naturel(n, "factorial")?;
    if n > FACTORIELLE_MAX {
        return Err(ErreurCalc::numerique("factorial : dépassement"));
    }
    vers_f64(&produit(2, n), "factorial")
}

/// r > n : on propage l’échec de (n-r)! comme le ferait n!/(n-r)!.
fn verifier_n_r(n: f64, r: f64, quoi: &str) -> Resultat<(u64, u64)> {
    let nn = entier_naturel(n, quoi)?;
    let rr = entier_naturel(r, quoi)?;
    if rr > nn {
        return Err(ErreurCalc::domaine(format!(
            "{quoi} : factorial({}) n’existe pas (r > n)",
            n - r
        )));
    }
    Ok((nn, rr))
}

/// nPr = n! / (n-r)!
pub fn npr(n: f64, r: f64) -> Resultat<f64> {
    let (n, r) = verifier_n_r(n, r, "nPr")?;
    if r > FACTORIELLE_MAX {
        // produit de plus de 170 facteurs ≥ 1 distincts : ≥ 171!
        return Err(ErreurCalc::numerique("nPr : dépassement"));
    }
    vers_f64(&produit(n - r + 1, n), "nPr")
}

/// nCr = n! / (r!·(n-r)!)
pub fn ncr(n: f64, r: f64) -> Resultat<f64> {
    let (n, r) = verifier_n_r(n, r, "nCr")?;
    let k = r.min(n - r);
    if k > COMBINAISON_K_MAX {
        return Err(ErreurCalc::numerique("nCr : dépassement"));
    }

    // formule multiplicative : chaque quotient intermédiaire est entier
    let mut acc = BigUint::one();
    for i in 1..=k {
        acc *= n - k + i;
        acc /= i;
    }
    vers_f64(&acc, "nCr")
}
