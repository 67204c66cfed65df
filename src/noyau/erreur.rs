// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toutes se replient sur le même marqueur visible ("Error") dans `evaluate`.

use thiserror::Error;

/// Marqueur unique renvoyé à l’UI quand l’évaluation échoue.
pub const MARQUEUR_ERREUR: &str = "Error";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("racine carrée d’un nombre négatif")]
    RacineNegative,

    #[error("factorielle d’un nombre négatif")]
    FactorielleNegative,

    /// Résultat non fini (NaN / infini) d’une fonction transcendante.
    #[error("hors domaine pour {0}")]
    HorsDomaine(String),

    /// Opérateur rencontré alors que la pile de valeurs est vide.
    #[error("opérande manquant pour « {0} »")]
    PileVide(String),

    #[error("jeton inconnu : « {0} »")]
    JetonInconnu(String),

    /// Garde-fous (factorielle, exposant, longueur d’affichage).
    #[error("dépassement : {0}")]
    Depassement(String),
}
