// src/app/etat.rs
//
// État UI (sans vue).
//
// Rôle : contenir l’état de la calculatrice (affichage, aperçu, historique,
// mode scientifique) et appliquer les touches, sans logique de rendu.
//
// Contrats :
// - Une seule évaluation ici : l’aperçu, recalculé après chaque touche.
// - Actions déterministes, sans effet de bord caché.
// - Historique borné (3 entrées, la plus récente en tête), jamais persisté.

use std::collections::VecDeque;

use crate::noyau::jetons::Fonction;
use crate::noyau::{eval_expression, Contexte, DemarcheNoyau, MARQUEUR_ERREUR};

/// Nombre d’entrées gardées dans l’historique.
const HISTORIQUE_MAX: usize = 3;

/// Affichage « vide » de la calculatrice.
const AFFICHAGE_INITIAL: &str = "0";

/// Touches de la calculatrice (pavé + clavier physique).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// Chiffre, '.', opérateur, parenthèse, '!' ou '%' (ou lettre tapée au clavier)
    Saisie(char),
    /// Ajoute "nom(".
    Fonction(Fonction),
    /// C : affichage remis à "0".
    Effacer,
    /// AC : vide l’historique.
    EffacerHistorique,
    Egal,
    /// 1/x : ajoute "^(-1)".
    Inverse,
    /// x^y : ajoute "^".
    Puissance,
    /// <- : retire le dernier caractère.
    Retour,
    /// Sc : bascule le mode scientifique (ne change que les touches visibles).
    Scientifique,
}

/// Libellé du pavé -> touche. "" (case vide) et libellés inconnus => None.
pub fn touche_du_libelle(libelle: &str) -> Option<Touche> {
    let t = match libelle {
        "C" => Touche::Effacer,
        "AC" => Touche::EffacerHistorique,
        "=" => Touche::Egal,
        "1/x" => Touche::Inverse,
        "x^y" => Touche::Puissance,
        "<-" => Touche::Retour,
        "Sc" => Touche::Scientifique,
        "x!" => Touche::Saisie('!'),
        _ => {
            if let Some(f) = Fonction::depuis_nom(libelle) {
                return Some(Touche::Fonction(f));
            }
            let mut it = libelle.chars();
            match (it.next(), it.next()) {
                (Some(c), None) => return touche_clavier(c),
                _ => return None,
            }
        }
    };
    Some(t)
}

/// Caractère tapé au clavier -> touche (jeu de caractères accepté seulement).
pub fn touche_clavier(c: char) -> Option<Touche> {
    let accepte = c.is_ascii_digit()
        || c.is_ascii_lowercase()
        || matches!(c, '.' | '^' | '*' | '/' | '+' | '-' | '(' | ')' | '!' | '%');
    accepte.then_some(Touche::Saisie(c))
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- saisie ---
    pub affichage: String,

    // --- sorties ---
    pub apercu: String, // "" si rien à montrer, sinon résultat ou "Error"
    pub historique: VecDeque<String>,

    // --- démarche (panneau d’explication) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub scientifique: bool,
    pub contexte: Contexte,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Contexte::default(), false)
    }
}

impl AppCalc {
    pub fn new(contexte: Contexte, scientifique: bool) -> Self {
        Self {
            affichage: AFFICHAGE_INITIAL.to_string(),
            apercu: String::new(),
            historique: VecDeque::with_capacity(HISTORIQUE_MAX),
            demarche: DemarcheNoyau::default(),
            scientifique,
            contexte,
        }
    }

    /// "AC" tant que l’affichage est vide, "C" sinon.
    pub fn libelle_effacement(&self) -> &'static str {
        if self.affichage == AFFICHAGE_INITIAL {
            "AC"
        } else {
            "C"
        }
    }

    /// Disposition du pavé (libellés). Case vide = "".
    pub fn rangees(&self) -> Vec<Vec<&'static str>> {
        let eff = self.libelle_effacement();
        if self.scientifique {
            vec![
                vec!["log", "ln", "sin", "cos", "tan"],
                vec!["sqrt", "%", "asin", "acos", "atan"],
                vec!["x!", eff, "<-", "x^y", "/"],
                vec!["1/x", "7", "8", "9", "x"],
                vec!["(", "4", "5", "6", "-"],
                vec![")", "1", "2", "3", "+"],
                vec!["Sc", "", "0", ".", "="],
            ]
        } else {
            vec![
                vec![eff, "<-", "x^y", "/"],
                vec!["7", "8", "9", "x"],
                vec!["4", "5", "6", "-"],
                vec!["1", "2", "3", "+"],
                vec!["Sc", "0", ".", "="],
            ]
        }
    }

    /* ------------------------ Touches ------------------------ */

    pub fn appuyer(&mut self, touche: Touche) {
        match touche {
            Touche::Effacer => {
                self.affichage = AFFICHAGE_INITIAL.to_string();
            }
            Touche::EffacerHistorique => {
                self.historique.clear();
            }
            Touche::Egal => self.valider(),
            Touche::Inverse => self.affichage.push_str("^(-1)"),
            Touche::Puissance => self.affichage.push('^'),
            Touche::Retour => {
                self.affichage.pop();
                if self.affichage.is_empty() {
                    self.affichage = AFFICHAGE_INITIAL.to_string();
                }
            }
            Touche::Scientifique => {
                self.scientifique = !self.scientifique;
            }
            Touche::Fonction(f) => {
                let txt = format!("{}(", f.nom());
                self.inserer(&txt, false);
            }
            Touche::Saisie(c) => {
                let mut buf = [0u8; 4];
                self.inserer(c.encode_utf8(&mut buf), c == '.');
            }
        }

        self.rafraichir_apercu();
    }

    /// Ajoute du texte ; un "0" seul est remplacé (sauf pour '.').
    fn inserer(&mut self, txt: &str, garde_zero: bool) {
        if self.affichage == AFFICHAGE_INITIAL && !garde_zero {
            self.affichage = txt.to_string();
        } else {
            self.affichage.push_str(txt);
        }
    }

    /// "=" : l’aperçu valide devient l’affichage, l’ancienne saisie part en historique.
    fn valider(&mut self) {
        if self.apercu.is_empty() || self.apercu == MARQUEUR_ERREUR {
            return;
        }

        let entree = format!("{} = {}", self.affichage, self.apercu);
        self.historique.push_front(entree);
        self.historique.truncate(HISTORIQUE_MAX);

        self.affichage = self.apercu.clone();
    }

    /// Aperçu en direct : rien tant que l’affichage est "0" (ou vide).
    pub fn rafraichir_apercu(&mut self) {
        if self.affichage.is_empty() || self.affichage == AFFICHAGE_INITIAL {
            self.apercu.clear();
            self.demarche = DemarcheNoyau::default();
            return;
        }

        match eval_expression(&self.affichage, &self.contexte) {
            Ok(ev) => {
                self.apercu = ev.resultat;
                self.demarche = ev.demarche;
            }
            Err(e) => {
                log::debug!("aperçu de {:?} : {e}", self.affichage);
                self.apercu = MARQUEUR_ERREUR.to_string();
                self.demarche = DemarcheNoyau::default();
            }
        }
    }
}
