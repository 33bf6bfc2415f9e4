//! src/app/etat.rs
//!
//! État de l’application (sans vue) : session de calcul + historique persistant.
//!
//! Contrats :
//! - toute interaction passe par `executer(Action)` (boutons et clavier)
//! - un calcul réussi est reporté dans l’historique
//! - un échec de persistance est signalé (alerte), jamais bloquant

use tracing::warn;

use crate::historique::{ErreurStockage, Historique};
use crate::noyau::{Calcul, Entree, ErreurCalc, Session};

/// Tout ce que l’utilisateur peut déclencher.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Saisir(Entree),
    Evaluer,
    EffacerDernier,
    Effacer,
    BasculerAngle,
    XRoot,
    Reciprocal,
    Square,
    Factorielle,
    MemoireAjouter,
    MemoireSoustraire,
    MemoireRappeler,
    MemoireEffacer,
    EffacerHistorique,
    /// Réécrit l’historique complet après un échec de persistance.
    ResauverHistorique,
}

pub struct AppCalc {
    pub session: Session,
    pub historique: Historique,
    /// Dernier échec de persistance (affiché sous l’historique).
    pub alerte_stockage: Option<String>,
}

impl AppCalc {
    pub fn nouveau(session: Session, historique: Historique) -> Self {
        Self {
            session,
            historique,
            alerte_stockage: None,
        }
    }

    pub fn executer(&mut self, action: Action) {
        let res: Result<Calcul, ErreurCalc> = match action {
            Action::Saisir(e) => return self.session.saisir(e),
            Action::EffacerDernier => return self.session.effacer_dernier(),
            Action::Effacer => return self.session.effacer(),
            Action::BasculerAngle => return self.session.basculer_mode_angle(),
            Action::MemoireAjouter => return self.session.memoire_ajouter(),
            Action::MemoireSoustraire => return self.session.memoire_soustraire(),
            Action::MemoireRappeler => return self.session.memoire_rappeler(),
            Action::MemoireEffacer => return self.session.memoire_effacer(),
            Action::EffacerHistorique => {
                let r = self.historique.clear_all();
                return self.noter_stockage(r);
            }
            Action::ResauverHistorique => {
                let r = self.historique.persister_tout();
                return self.noter_stockage(r);
            }

            Action::Evaluer => self.session.evaluer(),
            Action::XRoot => self.session.x_root(),
            Action::Reciprocal => self.session.reciprocal(),
            Action::Square => self.session.square(),
            Action::Factorielle => self.session.factorielle(),
        };

        // l’erreur de calcul est déjà portée par la session (indicateur)
        if let Ok(calcul) = res {
            self.consigner(calcul);
        }
    }

    fn consigner(&mut self, calcul: Calcul) {
        let mut r = self.historique.append(calcul.into());
        // après un échec, le stockage a pris du retard : on le resynchronise
        if r.is_ok() && self.alerte_stockage.is_some() {
            r = self.historique.persister_tout();
        }
        self.noter_stockage(r);
    }

    fn noter_stockage(&mut self, r: Result<(), ErreurStockage>) {
        match r {
            Ok(()) => self.alerte_stockage = None,
            Err(e) => {
                warn!(erreur = %e, "historique non persisté");
                self.alerte_stockage = Some(e.to_string());
            }
        }
    }
}
