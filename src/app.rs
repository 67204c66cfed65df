// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use calculatrice_sci::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (pas de champ texte, donc pas de double déclenchement) :
// - caractères acceptés => saisie
// - Backspace = "<-", Enter = "=", Escape = "C"

pub mod etat;
pub mod vue;

// Ré-export pratique : `use calculatrice_sci::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use etat::{touche_clavier, Touche};

impl AppCalc {
    fn clavier(&mut self, ctx: &egui::Context) {
        let evenements = ctx.input(|i| i.events.clone());

        for ev in evenements {
            match ev {
                egui::Event::Text(texte) => {
                    for c in texte.chars() {
                        if let Some(t) = touche_clavier(c) {
                            self.appuyer(t);
                        }
                    }
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Backspace => self.appuyer(Touche::Retour),
                    egui::Key::Enter => self.appuyer(Touche::Egal),
                    egui::Key::Escape => self.appuyer(Touche::Effacer),
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
