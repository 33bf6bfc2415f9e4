// src/app/vue.rs
//
// Vue (UI egui), natif + web
// ---------------------------
// - Affichage en lecture seule : la saisie passe uniquement par les touches
//   (boutons ou clavier physique, cf. clavier.rs)
// - Indicateurs : DEG/RAD, M (mémoire non nulle)
// - Panneaux : Démarche (dernier « = ») + Historique (avec effacement)

use eframe::egui;

use super::etat::{Action, AppCalc};
use crate::noyau::{Entree, Fonction, Operateur};

const TAILLE_TOUCHE: [f32; 2] = [58.0, 34.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                self.ui_touches(ui);

                ui.add_space(8.0);
                ui.separator();
                self.ui_demarche(ui);

                ui.separator();
                self.ui_historique(ui);
            });
    }

    fn ui_affichage(&self, ui: &mut egui::Ui) {
        let contexte = &self.session.contexte;

        ui.horizontal(|ui| {
            ui.monospace(contexte.mode_angle.libelle());
            if contexte.memoire != 0.0 {
                ui.monospace("M");
            }
        });

        let texte = self.session.affichage();
        let couleur = if self.session.erreur().is_some() {
            ui.visuals().error_fg_color
        } else {
            ui.visuals().strong_text_color()
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let texte = if texte.is_empty() { "0".to_string() } else { texte };
                    ui.label(egui::RichText::new(texte).monospace().size(26.0).color(couleur));
                });
            });

        if let Some(e) = self.session.erreur() {
            ui.small(e.to_string());
        }
    }

    fn ui_touches(&mut self, ui: &mut egui::Ui) {
        let mode = self.session.contexte.mode_angle.bascule().libelle();

        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, mode, Action::BasculerAngle);
                self.touche(ui, "MC", Action::MemoireEffacer);
                self.touche(ui, "MR", Action::MemoireRappeler);
                self.touche(ui, "M+", Action::MemoireAjouter);
                self.touche(ui, "M−", Action::MemoireSoustraire);
                ui.end_row();

                self.fonction(ui, "sin", Fonction::Sin);
                self.fonction(ui, "cos", Fonction::Cos);
                self.fonction(ui, "tan", Fonction::Tan);
                self.fonction(ui, "√", Fonction::Sqrt);
                self.touche(ui, "x√y", Action::XRoot);
                ui.end_row();

                self.fonction(ui, "asin", Fonction::Asin);
                self.fonction(ui, "acos", Fonction::Acos);
                self.fonction(ui, "atan", Fonction::Atan);
                self.fonction(ui, "sinh", Fonction::Sinh);
                self.fonction(ui, "cosh", Fonction::Cosh);
                ui.end_row();

                self.fonction(ui, "tanh", Fonction::Tanh);
                self.fonction(ui, "log", Fonction::Log10);
                self.fonction(ui, "ln", Fonction::Ln);
                self.fonction(ui, "eˣ", Fonction::Exp);
                self.saisie(ui, "^", Entree::puissance());
                ui.end_row();

                self.touche(ui, "x²", Action::Square);
                self.touche(ui, "n!", Action::Factorielle);
                self.saisie(ui, "nPr", Entree::permutation());
                self.saisie(ui, "nCr", Entree::combinaison());
                self.touche(ui, "1/x", Action::Reciprocal);
                ui.end_row();

                self.saisie(ui, "(", Entree::par_ouvrante());
                self.saisie(ui, ")", Entree::par_fermante());
                self.saisie(ui, ",", Entree::virgule());
                self.saisie(ui, "%", Entree::pourcent());
                self.saisie(ui, "!", Entree::factorielle());
                ui.end_row();

                self.chiffre(ui, '7');
                self.chiffre(ui, '8');
                self.chiffre(ui, '9');
                self.touche(ui, "DEL", Action::EffacerDernier);
                self.touche(ui, "C", Action::Effacer);
                ui.end_row();

                self.chiffre(ui, '4');
                self.chiffre(ui, '5');
                self.chiffre(ui, '6');
                self.saisie(ui, "×", Entree::operateur(Operateur::Fois));
                self.saisie(ui, "÷", Entree::operateur(Operateur::Divise));
                ui.end_row();

                self.chiffre(ui, '1');
                self.chiffre(ui, '2');
                self.chiffre(ui, '3');
                self.saisie(ui, "+", Entree::operateur(Operateur::Plus));
                self.saisie(ui, "−", Entree::operateur(Operateur::Moins));
                ui.end_row();

                self.chiffre(ui, '0');
                self.chiffre(ui, '.');
                self.saisie(ui, "π", Entree::pi());
                self.saisie(ui, "Ans", Entree::ans());
                self.touche(ui, "=", Action::Evaluer);
                ui.end_row();
            });
    }

    fn ui_demarche(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| match self.session.demarche() {
                Some(d) => {
                    champ(ui, "Source", &d.source);
                    champ(ui, "Jetons", &d.jetons);
                    champ(ui, "RPN", &d.rpn);
                    champ(ui, "Brut", &d.brut);
                    if !d.note.is_empty() {
                        champ(ui, "Note", &d.note);
                    }
                }
                None => {
                    ui.weak("Aucun calcul pour l’instant.");
                }
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut action = None;

        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("Historique vide.");
                } else {
                    // plus récent en haut
                    for e in self.historique.load_all().iter().rev() {
                        ui.monospace(e.texte());
                    }
                    ui.add_space(4.0);
                    if ui.button("Effacer l’historique").clicked() {
                        action = Some(Action::EffacerHistorique);
                    }
                }

                if let Some(alerte) = &self.alerte_stockage {
                    ui.add_space(4.0);
                    ui.colored_label(
                        ui.visuals().warn_fg_color,
                        format!("Historique non sauvegardé : {alerte}"),
                    );
                    if ui.button("Réessayer").clicked() {
                        action = Some(Action::ResauverHistorique);
                    }
                }
            });

        if let Some(a) = action {
            self.executer(a);
        }
    }

    /* ------------------------ Touches ------------------------ */

    fn touche(&mut self, ui: &mut egui::Ui, label: &str, action: Action) {
        if ui.add_sized(TAILLE_TOUCHE, egui::Button::new(label)).clicked() {
            self.executer(action);
        }
    }

    fn saisie(&mut self, ui: &mut egui::Ui, label: &str, entree: Entree) {
        self.touche(ui, label, Action::Saisir(entree));
    }

    fn fonction(&mut self, ui: &mut egui::Ui, label: &str, f: Fonction) {
        self.saisie(ui, label, Entree::fonction(f));
    }

    fn chiffre(&mut self, ui: &mut egui::Ui, c: char) {
        if let Some(e) = Entree::chiffre(c) {
            self.saisie(ui, &c.to_string(), e);
        }
    }
}

fn champ(ui: &mut egui::Ui, titre: &str, contenu: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(format!("{titre} :"));
        ui.monospace(contenu);
    });
}
