//! Noyau décimal de la calculatrice
//!
//! Organisation interne :
//! - erreur.rs   : taxonomie des erreurs (toutes => "Error" pour l’UI)
//! - decimal.rs  : contexte decimal64, arrondi au pair, division, puissance, rendu texte
//! - jetons.rs   : tokenisation + fusion du moins unaire
//! - rpn.rs      : shunting-yard (précédence, ^ à droite, fonctions)
//! - eval.rs     : pile RPN + pipeline complet

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use decimal::Contexte;
pub use erreur::{ErreurCalcul, MARQUEUR_ERREUR};
pub use eval::{eval_expression, evaluate, evaluate_avec, DemarcheNoyau, Evaluation};
