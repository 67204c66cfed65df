// src/lib.rs
//
// Calculatrice scientifique — bibliothèque
// ----------------------------------------
// - noyau : évaluateur décimal (`noyau::evaluate`, fonction totale)
// - app   : état + vue egui, partagés par le binaire natif et le web

pub mod app;
pub mod noyau;

pub use noyau::evaluate;
