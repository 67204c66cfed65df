//! Tests de propriétés : invariants du contrat `evaluate`.
//!
//! - arithmétique entière exacte (grille bornée d’entiers)
//! - idempotence : un résultat numérique réévalué reste identique
//! - aperçu : un opérateur final derrière un nombre ne change rien
//! - déterminisme : même entrée => même sortie

use super::decimal::Contexte;
use super::eval_expression;
use super::evaluate;

const ENTIERS: [i64; 11] = [-12, -7, -2, -1, 0, 1, 2, 3, 9, 10, 125];

/// Rendu attendu d’un rationnel a/b exact en décimal fini (b diviseur de 10^k).
fn attendu_division(a: i64, b: i64) -> Option<String> {
    // on ne garde que les divisions à développement fini court
    for k in 0..=6u32 {
        let p = 10i64.pow(k);
        if (a * p) % b == 0 {
            let q = a * p / b;
            let neg = q < 0;
            let q = q.unsigned_abs().to_string();
            let q = format!("{:0>width$}", q, width = k as usize + 1);
            let (ent, frac) = q.split_at(q.len() - k as usize);
            let frac = frac.trim_end_matches('0');
            let mut s = if frac.is_empty() {
                ent.to_string()
            } else {
                format!("{ent}.{frac}")
            };
            if neg && s != "0" {
                s.insert(0, '-');
            }
            return Some(s);
        }
    }
    None
}

fn expr_binaire(a: i64, op: char, b: i64) -> String {
    // b négatif => littéral fusionné ("3x-2")
    format!("{a}{op}{b}")
}

#[test]
fn prop_addition_soustraction_multiplication_exactes() {
    for a in ENTIERS {
        for b in ENTIERS {
            assert_eq!(evaluate(&expr_binaire(a, '+', b)), (a + b).to_string(), "{a}+{b}");
            assert_eq!(evaluate(&expr_binaire(a, 'x', b)), (a * b).to_string(), "{a}x{b}");
            assert_eq!(evaluate(&expr_binaire(a, '*', b)), (a * b).to_string(), "{a}*{b}");
            // "a--b" : le second '-' fusionne avec b
            assert_eq!(evaluate(&expr_binaire(a, '-', b)), (a - b).to_string(), "{a}-{b}");
        }
    }
}

#[test]
fn prop_division_exacte_quand_finie() {
    let mut vues = 0usize;
    for a in ENTIERS {
        for b in ENTIERS {
            let expr = expr_binaire(a, '/', b);
            if b == 0 {
                assert_eq!(evaluate(&expr), "Error", "{expr}");
                continue;
            }
            if let Some(att) = attendu_division(a, b) {
                assert_eq!(evaluate(&expr), att, "{expr}");
                vues += 1;
            }
        }
    }
    assert!(vues > 50, "grille trop pauvre: {vues}");
}

#[test]
fn prop_idempotence_sur_resultats() {
    let exprs = [
        "2+3", "1/3", "-5+3", "2^3^2", "50%", "5!", "sqrt(2)", "sin(30)", "10/4", "0.1+0.2",
        "2^-3", "3*-2", "log(2)",
    ];
    for e in exprs {
        let r = evaluate(e);
        assert_ne!(r, "Error", "expr={e:?}");
        assert_eq!(evaluate(&r), r, "idempotence cassée pour {e:?} -> {r:?}");
    }
}

#[test]
fn prop_operateur_final_ignore() {
    for e in ["12", "2+3", "2x3", "7/2", "2^5", "1-9"] {
        let base = evaluate(e);
        for op in ['+', '-', 'x', '*', '/', '^'] {
            let avec = format!("{e}{op}");
            assert_eq!(evaluate(&avec), base, "aperçu {avec:?}");
        }
    }
}

#[test]
fn prop_determinisme() {
    for e in ["1/7", "sin(33)+cos(12)", "3!x4%", "2^0.5", "pi", "(3"] {
        assert_eq!(evaluate(e), evaluate(e), "expr={e:?}");
    }
}

#[test]
fn prop_succes_ou_marqueur() {
    // Err typée <=> marqueur "Error" côté UI
    let ctx = Contexte::default();
    for e in ["5/0", "sqrt(-4)", "(-1)!", "pi", "2+3", "", "3+"] {
        let typee = eval_expression(e, &ctx);
        let texte = evaluate(e);
        match typee {
            Ok(ev) => assert_eq!(ev.resultat, texte, "expr={e:?}"),
            Err(_) => assert_eq!(texte, "Error", "expr={e:?}"),
        }
    }
}
