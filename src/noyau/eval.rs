//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> rognage de l’opérateur final -> RPN -> pile de décimaux -> texte
//!
//! Contrat de `evaluate` : fonction totale. Toute chaîne donne soit un
//! nombre décimal en texte simple, soit le marqueur "Error". Rien ne panique,
//! rien ne remonte à l’appelant.

use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::decimal::{
    additionner, depuis_f64, diviser, en_texte, est_negatif, factorielle, lire_nombre, puissance,
    vers_entier_i64, vers_f64, Contexte,
};
use super::erreur::{ErreurCalcul, MARQUEUR_ERREUR};
use super::jetons::{format_tokens, tokenize, Fonction, Op, Postfixe, Tok};
use super::rpn::to_rpn;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub resultat: String,
    pub demarche: DemarcheNoyau,
}

/// API publique : évalue avec le contexte decimal64 ; "Error" en cas d’échec.
pub fn evaluate(expr: &str) -> String {
    evaluate_avec(expr, &Contexte::default())
}

/// Comme `evaluate`, avec un contexte explicite (précision, garde-fous).
pub fn evaluate_avec(expr: &str, ctx: &Contexte) -> String {
    match eval_expression(expr, ctx) {
        Ok(ev) => ev.resultat,
        Err(e) => {
            log::debug!("évaluation de {expr:?} : {e}");
            MARQUEUR_ERREUR.to_string()
        }
    }
}

/// Pipeline complet avec démarche (jetons + RPN) et erreur typée.
pub fn eval_expression(expr: &str, ctx: &Contexte) -> Result<Evaluation, ErreurCalcul> {
    // 0) Raccourci : la saisie est déjà un nombre => rendue telle quelle
    if lire_nombre(expr).is_some() {
        return Ok(Evaluation {
            resultat: expr.to_string(),
            demarche: DemarcheNoyau {
                jetons: expr.to_string(),
                rpn: expr.to_string(),
            },
        });
    }

    // 1) Jetons
    let mut jetons = tokenize(expr);

    // 2) Aperçu en cours de saisie : "3+" se lit "3"
    rogner_operateur_final(&mut jetons);

    // 3) RPN
    let rpn = to_rpn(&jetons);

    let demarche = DemarcheNoyau {
        jetons: format_tokens(&jetons, ctx)?,
        rpn: format_tokens(&rpn, ctx)?,
    };
    log::debug!("jetons [{}] -> rpn [{}]", demarche.jetons, demarche.rpn);

    // 4) Pile
    let resultat = eval_rpn(&rpn, ctx)?;

    Ok(Evaluation { resultat, demarche })
}

/// Retire un opérateur final de la table s’il suit directement un nombre.
fn rogner_operateur_final(jetons: &mut Vec<Tok>) {
    let n = jetons.len();
    if n >= 2 && matches!(jetons[n - 1], Tok::Operateur(_)) && jetons[n - 2].est_nombre() {
        jetons.pop();
    }
}

/// Évalue une RPN avec une pile de décimaux.
///
/// - pile vide sur un opérateur => erreur
/// - opérateur binaire sans opérande gauche => gauche = 0 (tolérance conservée)
/// - résultat : la première valeur de la pile (base), "0" si la RPN est vide
pub fn eval_rpn(rpn: &[Tok], ctx: &Contexte) -> Result<String, ErreurCalcul> {
    let mut pile: Vec<BigDecimal> = Vec::new();

    for tok in rpn {
        let v = match tok {
            Tok::Nombre(d) => d.clone(),
            _ => {
                let Some(op1) = pile.pop() else {
                    let nom = format_tokens(std::slice::from_ref(tok), ctx)?;
                    return Err(ErreurCalcul::PileVide(nom));
                };

                match tok {
                    Tok::Operateur(op) => {
                        let op2 = pile.pop().unwrap_or_else(BigDecimal::zero);
                        appliquer_binaire(*op, op2, op1, ctx)?
                    }
                    Tok::Postfixe(Postfixe::Factorielle) => factorielle(&op1, ctx)?,
                    Tok::Postfixe(Postfixe::Pourcent) => {
                        diviser(&op1, &BigDecimal::from(100), ctx.precision)?
                    }
                    Tok::Fonction(f) => appliquer_fonction(*f, &op1)?,
                    _ => {
                        let nom = format_tokens(std::slice::from_ref(tok), ctx)?;
                        return Err(ErreurCalcul::JetonInconnu(nom));
                    }
                }
            }
        };
        pile.push(v);
    }

    match pile.first() {
        None => Ok("0".to_string()),
        Some(v) => en_texte(v, ctx),
    }
}

/// op2 (gauche) `op` op1 (droite).
fn appliquer_binaire(
    op: Op,
    op2: BigDecimal,
    op1: BigDecimal,
    ctx: &Contexte,
) -> Result<BigDecimal, ErreurCalcul> {
    match op {
        Op::Plus => additionner(&op2, &op1),
        Op::Moins => additionner(&op2, &-op1),
        Op::Fois | Op::FoisX => Ok(op2 * op1),
        Op::Divise => diviser(&op2, &op1, ctx.precision),
        Op::Puissance => {
            // exposant tronqué à l’entier
            let n = vers_entier_i64(&op1)
                .ok_or_else(|| ErreurCalcul::Depassement("exposant".into()))?;
            puissance(&op2, n, ctx)
        }
    }
}

/// Fonctions via f64 : degrés en entrée (sin/cos/tan), degrés en sortie (asin/acos/atan).
/// Le résultat garde la forme f64 la plus courte, sans arrondi au contexte.
fn appliquer_fonction(f: Fonction, x: &BigDecimal) -> Result<BigDecimal, ErreurCalcul> {
    if f == Fonction::Sqrt && est_negatif(x) {
        return Err(ErreurCalcul::RacineNegative);
    }

    let v = vers_f64(x);
    let r = match f {
        Fonction::Sin => v.to_radians().sin(),
        Fonction::Cos => v.to_radians().cos(),
        Fonction::Tan => v.to_radians().tan(),
        Fonction::Asin => v.asin().to_degrees(),
        Fonction::Acos => v.acos().to_degrees(),
        Fonction::Atan => v.atan().to_degrees(),
        Fonction::Sqrt => v.sqrt(),
        Fonction::Log => v.log10(),
        Fonction::Ln => v.ln(),
    };

    depuis_f64(r, f.nom())
}
