//! Historique des calculs (journal persistant, ajout seulement).
//!
//! Format persistant : sous la clé fixe `CLE_HISTORIQUE`, un tableau JSON de chaînes
//! `"<expression affichée> = <résultat>"`, réécrit en entier à chaque ajout
//! (lecture -> ajout -> écriture, pas de mise à jour partielle).
//!
//! La persistance est « best-effort » : un échec d’écriture n’annule jamais
//! le calcul qui l’a déclenché. La vue en mémoire reste à jour, et
//! `persister_tout` permet de retenter plus tard. Un contenu persistant
//! illisible est remplacé au premier ajout par la vue en mémoire.

mod stockage;

use tracing::{debug, warn};

use crate::noyau::lecture::format_resultat;
use crate::noyau::Calcul;

#[cfg(not(target_arch = "wasm32"))]
pub use stockage::StockageFichier;
#[cfg(target_arch = "wasm32")]
pub use stockage::StockageLocal;
pub use stockage::{ErreurStockage, Stockage, StockageMemoire};

/// Clé unique de l’historique dans le stockage.
pub const CLE_HISTORIQUE: &str = "calcHistory";

const SEPARATEUR: &str = " = ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

impl EntreeHistorique {
    pub fn new(expression: impl Into<String>, resultat: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            resultat: resultat.into(),
        }
    }

    /// Relit une ligne persistée. Le dernier " = " sépare expression et résultat ;
    /// une ligne sans séparateur est gardée telle quelle (résultat vide).
    pub fn depuis_texte(texte: &str) -> Self {
        match texte.rsplit_once(SEPARATEUR) {
            Some((e, r)) => Self::new(e, r),
            None => Self::new(texte, ""),
        }
    }

    pub fn texte(&self) -> String {
        format!("{}{SEPARATEUR}{}", self.expression, self.resultat)
    }
}

impl From<Calcul> for EntreeHistorique {
    fn from(c: Calcul) -> Self {
        Self::new(c.expression, format_resultat(c.resultat))
    }
}

pub struct Historique {
    entrees: Vec<EntreeHistorique>,
    stockage: Box<dyn Stockage>,
}

impl Historique {
    /// Charge l’historique persistant. Stockage illisible => historique vide (averti).
    pub fn charger(stockage: Box<dyn Stockage>) -> Self {
        let entrees = match lire_liste(stockage.as_ref()) {
            Ok(liste) => liste.iter().map(|t| EntreeHistorique::depuis_texte(t)).collect(),
            Err(e) => {
                warn!(erreur = %e, "historique illisible, démarrage à vide");
                Vec::new()
            }
        };
        debug!(n = entrees.len(), "historique chargé");
        Self { entrees, stockage }
    }

    /// Vue ordonnée (la plus ancienne d’abord).
    pub fn load_all(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Ajoute une entrée. La vue en mémoire est toujours mise à jour ;
    /// l’erreur éventuelle ne concerne que la persistance.
    pub fn append(&mut self, entree: EntreeHistorique) -> Result<(), ErreurStockage> {
        let texte = entree.texte();
        self.entrees.push(entree);

        let mut liste = match lire_liste(self.stockage.as_ref()) {
            Ok(liste) => liste,
            Err(ErreurStockage::Json(e)) => {
                // contenu illisible : la vue en mémoire fait foi
                warn!(erreur = %e, "historique persistant illisible, réécrit depuis la mémoire");
                return self.persister_tout();
            }
            Err(e) => return Err(e),
        };
        liste.push(texte);
        ecrire_liste(self.stockage.as_mut(), &liste)
    }

    /// Réécrit tout le journal depuis la vue en mémoire (reprise après un échec).
    pub fn persister_tout(&mut self) -> Result<(), ErreurStockage> {
        let liste: Vec<String> = self.entrees.iter().map(EntreeHistorique::texte).collect();
        ecrire_liste(self.stockage.as_mut(), &liste)
    }

    /// Vide la vue en mémoire ET le stockage.
    pub fn clear_all(&mut self) -> Result<(), ErreurStockage> {
        self.entrees.clear();
        self.stockage.supprimer(CLE_HISTORIQUE)
    }
}

fn lire_liste(stockage: &dyn Stockage) -> Result<Vec<String>, ErreurStockage> {
    match stockage.lire(CLE_HISTORIQUE)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

fn ecrire_liste(stockage: &mut dyn Stockage, liste: &[String]) -> Result<(), ErreurStockage> {
    let json = serde_json::to_string(liste)?;
    stockage.ecrire(CLE_HISTORIQUE, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::{Entree, Session};

    /// Stockage qui refuse toute écriture (quota dépassé).
    struct StockagePlein;

    impl Stockage for StockagePlein {
        fn lire(&self, _cle: &str) -> Result<Option<String>, ErreurStockage> {
            Ok(None)
        }
        fn ecrire(&mut self, _cle: &str, _valeur: &str) -> Result<(), ErreurStockage> {
            Err(ErreurStockage::Indisponible("quota dépassé".into()))
        }
        fn supprimer(&mut self, _cle: &str) -> Result<(), ErreurStockage> {
            Ok(())
        }
    }

    #[test]
    fn texte_aller_retour() {
        let e = EntreeHistorique::depuis_texte("1/(4) = 0.25");
        assert_eq!(e.expression, "1/(4)");
        assert_eq!(e.resultat, "0.25");
        assert_eq!(e.texte(), "1/(4) = 0.25");

        let brut = EntreeHistorique::depuis_texte("texte libre");
        assert_eq!(brut.expression, "texte libre");
        assert_eq!(brut.resultat, "");
    }

    #[test]
    fn reciproque_consignee() {
        let mut h = Historique::charger(Box::new(StockageMemoire::new()));
        let mut s = Session::default();
        s.saisir(Entree::chiffre('4').unwrap());
        let c = s.reciprocal().unwrap();
        h.append(c.into()).unwrap();
        assert_eq!(h.load_all()[0].texte(), "1/(4) = 0.25");
    }

    #[test]
    fn persiste_apres_rechargement() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut h = Historique::charger(Box::new(StockageFichier::new(dir.path())));
            h.append(EntreeHistorique::new("2×3", "6")).unwrap();
            h.append(EntreeHistorique::new("sin 90", "1")).unwrap();
            h.append(EntreeHistorique::new("1/(4)", "0.25")).unwrap();
        }

        let h = Historique::charger(Box::new(StockageFichier::new(dir.path())));
        let textes: Vec<String> = h.load_all().iter().map(EntreeHistorique::texte).collect();
        assert_eq!(textes, vec!["2×3 = 6", "sin 90 = 1", "1/(4) = 0.25"]);

        // format brut : tableau JSON de chaînes
        let json = std::fs::read_to_string(dir.path().join("calcHistory.json")).unwrap();
        let brut: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(brut.len(), 3);
    }

    #[test]
    fn clear_all_vide_les_deux_vues() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = Historique::charger(Box::new(StockageFichier::new(dir.path())));
        h.append(EntreeHistorique::new("1+1", "2")).unwrap();
        h.clear_all().unwrap();
        assert!(h.is_empty());

        let recharge = Historique::charger(Box::new(StockageFichier::new(dir.path())));
        assert!(recharge.is_empty());
    }

    #[test]
    fn echec_persistance_garde_la_vue() {
        let mut h = Historique::charger(Box::new(StockagePlein));
        let r = h.append(EntreeHistorique::new("1+1", "2"));
        assert!(matches!(r, Err(ErreurStockage::Indisponible(_))));
        assert_eq!(h.load_all().len(), 1);
        assert!(h.persister_tout().is_err());
    }

    #[test]
    fn stockage_corrompu_demarre_vide() {
        let mut s = StockageMemoire::new();
        s.ecrire(CLE_HISTORIQUE, "pas du json").unwrap();
        let h = Historique::charger(Box::new(s));
        assert!(h.is_empty());
    }

    #[test]
    fn stockage_corrompu_reecrit_au_premier_ajout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("calcHistory.json"), "pas du json").unwrap();

        {
            let mut h = Historique::charger(Box::new(StockageFichier::new(dir.path())));
            assert!(h.is_empty());
            h.append(EntreeHistorique::new("1+1", "2")).unwrap();
            h.append(EntreeHistorique::new("2×3", "6")).unwrap();
        }

        let h = Historique::charger(Box::new(StockageFichier::new(dir.path())));
        let textes: Vec<String> = h.load_all().iter().map(EntreeHistorique::texte).collect();
        assert_eq!(textes, vec!["1+1 = 2", "2×3 = 6"]);
    }

    #[test]
    fn reprise_apres_echec() {
        let mut s = StockageMemoire::new();
        s.ecrire(CLE_HISTORIQUE, "[\"ancien = 1\"]").unwrap();
        let mut h = Historique::charger(Box::new(s));
        h.append(EntreeHistorique::new("2+2", "4")).unwrap();
        h.persister_tout().unwrap();
        assert_eq!(h.load_all().len(), 2);
        assert_eq!(h.load_all()[0].expression, "ancien");
    }
}
