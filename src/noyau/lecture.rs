// src/noyau/lecture.rs
//
// Lecture du résultat : arrondi décimal + aimantation (0, ±1) + texte réutilisable.

use super::contexte::Arrondi;

/* ------------------------ Arrondi ------------------------ */

/// Arrondit à `decimales` chiffres, puis aimante vers 0 (et ±1 si demandé).
pub fn normaliser(x: f64, arrondi: &Arrondi) -> f64 {
    let mut v = arrondir(x, arrondi.decimales);

    if v.abs() < arrondi.seuil_zero {
        v = 0.0;
    }
    if arrondi.aimanter_unite && (v.abs() - 1.0).abs() < arrondi.seuil_zero {
        v = v.signum();
    }

    // pas de "-0" à l’écran
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Arrondi décimal sur l’écriture de `x` : `{:.d}` part de la valeur binaire
/// exacte, la relecture rend le flottant le plus proche. Pas de x·10^d,
/// donc ni perte de précision ni borne de grandeur, et le résultat est stable
/// (arrondir deux fois = arrondir une fois).
fn arrondir(x: f64, decimales: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{x:.prec$}", prec = decimales as usize)
        .parse()
        .unwrap_or(x)
}

/* ------------------------ Texte ------------------------ */

/// Texte du résultat : décimal positionnel (jamais d’exposant),
/// donc ré-évaluable tel quel pour un calcul enchaîné.
pub fn format_resultat(v: f64) -> String {
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: f64) -> f64 {
        normaliser(x, &Arrondi::default())
    }

    #[test]
    fn bruit_flottant_annule() {
        assert_eq!(n(0.1 + 0.2), 0.3);
        assert_eq!(n(1.0 / 3.0), 0.3333333333);
        assert_eq!(n(2.0 / 3.0), 0.6666666667);
    }

    #[test]
    fn aimantation_zero_et_unite() {
        assert_eq!(n(6.123233995736766e-17), 0.0);
        assert_eq!(n(-1e-12), 0.0);
        assert!(n(-1e-12).is_sign_positive());
        assert_eq!(n(0.99999999999), 1.0);
        assert_eq!(n(-0.99999999999), -1.0);
    }

    #[test]
    fn sans_aimant_unite() {
        let a = Arrondi {
            decimales: 12,
            aimanter_unite: false,
            ..Arrondi::default()
        };
        assert_eq!(normaliser(0.999999999999, &a), 0.999999999999);
    }

    #[test]
    fn grands_nombres_intacts() {
        assert_eq!(n(1e20), 1e20);
        assert_eq!(n(3628800.0), 3628800.0);
        assert_eq!(n(123456.789), 123456.789);
    }

    #[test]
    fn arrondi_sur_toute_la_plage() {
        assert_eq!(n(1_000_000.0 / 7.0), 142857.1428571429);
        assert_eq!(n(123456.1 + 0.2), 123456.3);
        assert_eq!(n(-1_000_000.0 / 3.0), -333333.3333333333);
        assert_eq!(n(1e15 + 0.25), 1e15 + 0.25);
        for x in [1_000_000.0 / 7.0, 2e5 / 3.0, 9e6 / 7.0, 4.5e14 / 7.0, -1e8 / 3.0] {
            let v = n(x);
            assert_eq!(n(v), v, "{x}");
        }
    }

    #[test]
    fn texte_reutilisable() {
        assert_eq!(format_resultat(3.0), "3");
        assert_eq!(format_resultat(0.25), "0.25");
        assert_eq!(format_resultat(-2.5), "-2.5");
        assert_eq!(format_resultat(1e21), "1000000000000000000000");
        assert!(!format_resultat(1e-7).contains('e'));
    }
}
