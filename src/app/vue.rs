// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Historique en haut (gris), affichage + aperçu alignés à droite
// - Pavé 4 colonnes (base) ou 5 colonnes (scientifique)
// - Tactile : boutons qui remplissent la largeur disponible
//
// Note :
// - Le clavier physique est géré dans app.rs (une seule source d’événements).

use eframe::egui;
use egui::{Color32, RichText};

use super::etat::{touche_du_libelle, AppCalc};

const ORANGE: Color32 = Color32::from_rgb(0xED, 0x81, 0x14);
const FOND_TOUCHE: Color32 = Color32::from_rgb(0x24, 0x24, 0x24);
const GRIS: Color32 = Color32::from_rgb(0x82, 0x83, 0x83);

/// Touches dessinées en orange (opérateurs + commandes).
const LIBELLES_ORANGE: [&str; 9] = ["+", "-", "x", "/", "C", "AC", "<-", "x^y", "Sc"];

/// Touches dessinées en gris (fonctions et postfixes).
const LIBELLES_GRIS: [&str; 15] = [
    "log", "ln", "sin", "cos", "tan", "sqrt", "%", "asin", "acos", "atan", "x!", "1/x", "(", ")",
    "!",
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_historique(ui);
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                self.ui_demarche(ui);
            });
    }

    fn ui_historique(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
            for ligne in &self.historique {
                ui.label(RichText::new(ligne).size(18.0).color(GRIS));
            }
        });
    }

    fn ui_affichage(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
            ui.add(
                egui::Label::new(RichText::new(&self.affichage).size(44.0).strong()).wrap(),
            );

            // hauteur stable même sans aperçu
            let apercu = if self.apercu.is_empty() {
                String::new()
            } else {
                format!("= {}", self.apercu)
            };
            ui.label(RichText::new(apercu).size(26.0).color(GRIS));
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let espacement = ui.spacing().item_spacing.x;

        for rangee in self.rangees() {
            let n = rangee.len() as f32;
            let largeur = ((ui.available_width() - (n - 1.0) * espacement) / n).max(40.0);
            let hauteur = (largeur * 0.7).clamp(36.0, 64.0);

            ui.horizontal(|ui| {
                for libelle in rangee {
                    if libelle.is_empty() {
                        ui.add_sized([largeur, hauteur], egui::Label::new(""));
                        continue;
                    }
                    if ui.add_sized([largeur, hauteur], Self::bouton(libelle)).clicked() {
                        if let Some(t) = touche_du_libelle(libelle) {
                            self.appuyer(t);
                        }
                    }
                }
            });
        }
    }

    fn bouton(libelle: &str) -> egui::Button<'static> {
        let texte = RichText::new(libelle.to_string()).size(22.0);
        if libelle == "=" {
            return egui::Button::new(texte.color(Color32::WHITE)).fill(ORANGE);
        }

        let couleur = if LIBELLES_ORANGE.contains(&libelle) {
            ORANGE
        } else if LIBELLES_GRIS.contains(&libelle) {
            GRIS
        } else {
            Color32::WHITE
        };
        egui::Button::new(texte.color(couleur)).fill(FOND_TOUCHE)
    }

    fn ui_demarche(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}
