// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), une seule pile d’opérateurs
//
// Règles:
// - Nombre (y compris littéral négatif fusionné) => sortie directe
// - Fonction => pile (elle sortira après la parenthèse fermante de son argument)
// - ! et % => sortie directe (ils s’appliquent à la valeur déjà produite)
// - '^' ne dépile jamais rien => associatif à droite
// - Tout autre jeton (opérateur ou inconnu) dépile tant que rang(sommet) >= rang(jeton)
//
// NOTE:
// - Une ')' sans '(' ne fait rien.
// - Une '(' jamais fermée reste dans la pile et sort en fin de RPN :
//   c’est l’évaluateur qui la refuse.

use super::jetons::{Op, Tok};

/// Table de précédence : plus haut = lie plus fort.
const PRECEDENCES: [(Op, u8); 6] = [
    (Op::Puissance, 4),
    (Op::FoisX, 3),
    (Op::Fois, 3),
    (Op::Divise, 3),
    (Op::Plus, 2),
    (Op::Moins, 2),
];

/// Rang d’un opérateur de la table.
pub fn rang_op(op: Op) -> u8 {
    PRECEDENCES
        .iter()
        .find(|(o, _)| *o == op)
        .map_or(0, |(_, r)| *r)
}

/// Rang d’un jeton quelconque : 0 hors table (valeur par défaut la plus basse).
fn rang(t: &Tok) -> u8 {
    match t {
        Tok::Operateur(op) => rang_op(*op),
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(sin), ParenG, Nombre(90), ParenD, Operateur(+), Nombre(1)]
///   rpn:    [Nombre(90), Fonction(sin), Nombre(1), Operateur(+)]
pub fn to_rpn(tokens: &[Tok]) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Nombre(_) | Tok::Postfixe(_) => out.push(tok),

            Tok::Fonction(_) | Tok::ParenG => ops.push(tok),

            Tok::ParenD => {
                // dépile jusqu’à '(' (exclue)
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::ParenG) {
                        break;
                    }
                    out.push(top);
                }

                // fonction au sommet : elle se colle à son argument
                if matches!(ops.last(), Some(Tok::Fonction(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            Tok::Operateur(_) | Tok::Inconnu(_) => {
                let associatif_droite = matches!(tok, Tok::Operateur(Op::Puissance));

                while let Some(top) = ops.last() {
                    if associatif_droite || matches!(top, Tok::ParenG) || rang(top) < rang(&tok) {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }

                ops.push(tok);
            }
        }
    }

    // vide la pile (ordre LIFO)
    while let Some(op) = ops.pop() {
        out.push(op);
    }

    out
}
