// src/main.rs
//
// Calculatrice scientifique — point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//   ou, avec une EXPR en argument, évaluation directe sur stdout
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// Journalisation :
// - natif : env_logger (RUST_LOG=debug pour voir jetons/RPN)
// - web   : eframe::WebLogger (console du navigateur)

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

use calculatrice_sci::app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice scientifique";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;

    use calculatrice_sci::noyau::decimal::{PRECISION_DECIMAL64, PRECISION_MAX};

    /// Calculatrice scientifique décimale (16 chiffres, arrondi au pair).
    ///
    /// Sans EXPR : ouvre la fenêtre. Avec EXPR : affiche le résultat et quitte.
    #[derive(Parser, Debug)]
    #[command(name = "calculatrice_sci", version, about)]
    pub struct Args {
        /// Expression à évaluer sans fenêtre (ex: "2^3^2", "sqrt(2)", "5!")
        pub expr: Option<String>,

        /// Chiffres significatifs des calculs décimaux
        #[arg(long, default_value_t = PRECISION_DECIMAL64,
              value_parser = clap::value_parser!(u64).range(1..=PRECISION_MAX))]
        pub precision: u64,

        /// Démarre la fenêtre en mode scientifique
        #[arg(long)]
        pub scientifique: bool,

        /// Affiche aussi les jetons et la RPN (avec EXPR)
        #[arg(long)]
        pub demarche: bool,
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;

    use calculatrice_sci::noyau::{eval_expression, Contexte, MARQUEUR_ERREUR};

    env_logger::init();
    let args = cli::Args::parse();
    let contexte = Contexte::avec_precision(args.precision);
    log::info!("démarrage ({} chiffres)", contexte.precision);

    if let Some(expr) = args.expr {
        match eval_expression(&expr, &contexte) {
            Ok(ev) => {
                if args.demarche {
                    println!("jetons : {}", ev.demarche.jetons);
                    println!("rpn    : {}", ev.demarche.rpn);
                }
                println!("{}", ev.resultat);
            }
            Err(e) => {
                log::warn!("{expr:?} : {e}");
                println!("{MARQUEUR_ERREUR}");
            }
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([420.0, 740.0])
            .with_min_inner_size([320.0, 560.0]),
        ..Default::default()
    };

    let scientifique = args.scientifique;
    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(AppCalc::new(contexte, scientifique)))
        }),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{egui, AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        // journal vers la console (déjà installé => on ignore)
        eframe::WebLogger::init(log::LevelFilter::Debug).ok();
        log::info!("démarrage web");

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

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    cc.egui_ctx.set_visuals(egui::Visuals::dark());
                    Ok(Box::<AppCalc>::default())
                }),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
