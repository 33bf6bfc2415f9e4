// src/main.rs
//
// Calculatrice scientifique : point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------
// - NATIF (Linux/Windows/macOS) : réglages TOML + historique fichier + eframe::run_native
// - WEB  (wasm32)              : historique localStorage + eframe::WebRunner sur <canvas>
//
// Côté WEB : index.html doit contenir `<canvas id="the_canvas_id"></canvas>`.
//
// Journal : RUST_LOG (défaut "warn"), ex. RUST_LOG=calculatrice_scientifique=debug

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
mod historique;
mod noyau;
mod reglages;

use app::AppCalc;
use historique::{Historique, StockageMemoire};
use noyau::Session;
use reglages::Reglages;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice scientifique";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use historique::StockageFichier;
    use tracing::{info, warn};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let reglages = Reglages::charger();

    let historique = match reglages.dossier_historique() {
        Some(dossier) => {
            let stockage = StockageFichier::new(dossier);
            info!(dossier = %stockage.dossier().display(), "historique sur disque");
            Historique::charger(Box::new(stockage))
        }
        None => {
            warn!("aucun dossier de données : historique limité à la session");
            Historique::charger(Box::new(StockageMemoire::new()))
        }
    };
    let app = AppCalc::nouveau(Session::new(reglages.contexte()), historique);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([400.0, 820.0])
            .with_min_inner_size([360.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(TITRE_APP, options, Box::new(|_cc| Ok(Box::new(app))))
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, Historique, Reglages, Session, StockageMemoire, TITRE_APP};
    use crate::historique::StockageLocal;

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        // localStorage refusé (navigation privée…) => historique de session
        let historique = match w.local_storage() {
            Ok(Some(_)) => Historique::charger(Box::new(StockageLocal)),
            _ => Historique::charger(Box::new(StockageMemoire::new())),
        };
        let app = AppCalc::nouveau(Session::new(Reglages::charger().contexte()), historique);

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::new(app))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
