// src/app.rs
//
// Module App (racine)
// -------------------
// - Sous-modules : etat.rs (état + actions), vue.rs (egui), clavier.rs (touches -> actions)
// - Ré-export d’AppCalc pour main.rs
// - impl eframe::App (natif + web)

pub mod clavier;
pub mod etat;
pub mod vue;

pub use etat::{Action, AppCalc};

use eframe::egui;

impl AppCalc {
    /// Clavier physique : lu une fois par frame, au niveau global
    /// (l’affichage n’est pas un champ éditable, il n’y a pas de focus à suivre).
    fn lire_clavier(&mut self, ctx: &egui::Context) {
        let touches: Vec<String> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|ev| match ev {
                    egui::Event::Text(t) => Some(t.clone()),
                    egui::Event::Key {
                        key: egui::Key::Enter,
                        pressed: true,
                        ..
                    } => Some("Enter".to_string()),
                    egui::Event::Key {
                        key: egui::Key::Backspace,
                        pressed: true,
                        ..
                    } => Some("Backspace".to_string()),
                    _ => None,
                })
                .collect()
        });

        for touche in touches {
            if let Some(action) = clavier::action_clavier(&touche) {
                self.executer(action);
                continue;
            }
            // texte collé / saisi d’un bloc : caractère par caractère
            for c in touche.chars() {
                if let Some(action) = clavier::action_clavier(c.encode_utf8(&mut [0; 4])) {
                    self.executer(action);
                }
            }
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = C
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.executer(Action::Effacer);
        }
        self.lire_clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
