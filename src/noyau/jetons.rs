// src/noyau/jetons.rs

use bigdecimal::BigDecimal;

use super::decimal::{en_texte, lire_nombre, Contexte};
use super::erreur::ErreurCalcul;

/// Opérateurs binaires (table de précédence dans rpn.rs).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Puissance, // ^
    FoisX,     // x (touche de la calculatrice)
    Fois,      // *
    Divise,    // /
    Plus,
    Moins,
}

impl Op {
    fn depuis_char(c: char) -> Option<Op> {
        match c {
            '^' => Some(Op::Puissance),
            'x' => Some(Op::FoisX),
            '*' => Some(Op::Fois),
            '/' => Some(Op::Divise),
            '+' => Some(Op::Plus),
            '-' => Some(Op::Moins),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Op::Puissance => '^',
            Op::FoisX => 'x',
            Op::Fois => '*',
            Op::Divise => '/',
            Op::Plus => '+',
            Op::Moins => '-',
        }
    }
}

/// Fonctions unaires reconnues. Ensemble fermé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log,
    Ln,
}

impl Fonction {
    pub const TOUTES: [Fonction; 9] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Sqrt,
        Fonction::Log,
        Fonction::Ln,
    ];

    /// Nom exact (minuscules) ; "SIN" n’est pas reconnu.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Self::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
        }
    }
}

/// Marqueurs postfixés : s’appliquent à la valeur déjà produite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Postfixe {
    Factorielle, // !
    Pourcent,    // %
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    // Littéral décimal, éventuellement négatif (moins unaire fusionné)
    Nombre(BigDecimal),

    Operateur(Op),
    Fonction(Fonction),
    Postfixe(Postfixe),

    ParenG,
    ParenD,

    // Tout le reste : identifiant non reconnu ("pi", "e"), littéral mal formé ("1.2.3", ".")
    Inconnu(String),
}

impl Tok {
    pub fn est_nombre(&self) -> bool {
        matches!(self, Tok::Nombre(_))
    }
}

/// Lexème brut (avant fusion du moins unaire).
fn lexemes(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        // Chiffres et points : [0-9.]+
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            out.push(chars[start..i].iter().collect());
            continue;
        }

        // Mots : lettres ASCII sauf x/X (x = multiplication, il coupe les mots)
        if est_lettre_de_mot(c) {
            let start = i;
            while i < chars.len() && est_lettre_de_mot(chars[i]) {
                i += 1;
            }
            out.push(chars[start..i].iter().collect());
            continue;
        }

        // Un caractère : opérateurs, parenthèses, marqueurs postfixés
        if matches!(c, '^' | '*' | 'x' | '/' | '+' | '-' | '(' | ')' | '!' | '%') {
            out.push(c.to_string());
        }

        // Tout autre caractère (espaces, 'X', unicode...) est ignoré
        i += 1;
    }

    out
}

fn est_lettre_de_mot(c: char) -> bool {
    c.is_ascii_alphabetic() && c != 'x' && c != 'X'
}

/// Après ces lexèmes, un '-' suivi d’un nombre est un moins unaire.
fn ouvre_un_operande(lex: &str) -> bool {
    matches!(lex, "x" | "*" | "-" | "+" | "^" | "/" | "(")
}

fn classer(lex: &str) -> Tok {
    if let Some(d) = lire_nombre(lex) {
        return Tok::Nombre(d);
    }
    if let Some(f) = Fonction::depuis_nom(lex) {
        return Tok::Fonction(f);
    }

    let mut it = lex.chars();
    if let (Some(c), None) = (it.next(), it.next()) {
        if let Some(op) = Op::depuis_char(c) {
            return Tok::Operateur(op);
        }
        match c {
            '(' => return Tok::ParenG,
            ')' => return Tok::ParenD,
            '!' => return Tok::Postfixe(Postfixe::Factorielle),
            '%' => return Tok::Postfixe(Postfixe::Pourcent),
            _ => {}
        }
    }

    Tok::Inconnu(lex.to_string())
}

/// Tokenize une chaîne en jetons.
///
/// Deux passes :
/// 1. découpage brut (nombres [0-9.]+, mots, opérateurs d’un caractère)
/// 2. fusion du moins unaire : un '-' en tête, ou juste après un opérateur
///    ou '(', et suivi d’un nombre, devient un littéral négatif.
///    Le contexte « après » est lu sur les lexèmes bruts.
///
/// Exemple:
///   "3*-2"  -> [Nombre(3), Operateur(*), Nombre(-2)]
///   "5--3"  -> [Nombre(5), Operateur(-), Nombre(-3)]
pub fn tokenize(s: &str) -> Vec<Tok> {
    let lex = lexemes(s);
    let mut out = Vec::with_capacity(lex.len());
    let mut i: usize = 0;

    while i < lex.len() {
        if lex[i] == "-" {
            let en_tete = i == 0;
            let apres_operateur = i > 0 && ouvre_un_operande(&lex[i - 1]);

            if en_tete || apres_operateur {
                if let Some(suivant) = lex.get(i + 1) {
                    if let Some(d) = lire_nombre(suivant) {
                        out.push(Tok::Nombre(-d));
                        i += 2;
                        continue;
                    }
                }
            }
        }

        out.push(classer(&lex[i]));
        i += 1;
    }

    out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
/// Les nombres sont rendus comme les résultats (même contexte, même plafond).
pub fn format_tokens(tokens: &[Tok], ctx: &Contexte) -> Result<String, ErreurCalcul> {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Nombre(d) => en_texte(d, ctx)?,
            Tok::Operateur(op) => op.symbole().to_string(),
            Tok::Fonction(f) => f.nom().to_string(),
            Tok::Postfixe(Postfixe::Factorielle) => "!".to_string(),
            Tok::Postfixe(Postfixe::Pourcent) => "%".to_string(),
            Tok::ParenG => "(".to_string(),
            Tok::ParenD => ")".to_string(),
            Tok::Inconnu(s) => s.clone(),
        };
        out.push(s);
    }
    Ok(out.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(s: &str) -> String {
        format_tokens(&tokenize(s), &Contexte::default()).unwrap()
    }

    #[test]
    fn rendu_des_nombres_suit_le_contexte() {
        let ctx = Contexte::default();
        let jetons = tokenize("1000+0.50");
        assert_eq!(format_tokens(&jetons, &ctx).unwrap(), "1000 + 0.5");

        // littéral trop long pour le plafond : erreur remontée, pas de texte de remplacement
        let etroit = Contexte {
            limite_affichage: 3,
            ..Contexte::default()
        };
        assert!(matches!(
            format_tokens(&jetons, &etroit),
            Err(ErreurCalcul::Depassement(_))
        ));
        assert_eq!(format_tokens(&tokenize("2+3"), &etroit).unwrap(), "2 + 3");
    }

    #[test]
    fn vide_donne_vide() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn nombres_operateurs_parentheses() {
        assert_eq!(txt("12.5+3"), "12.5 + 3");
        assert_eq!(txt("(1+2)x3"), "( 1 + 2 ) x 3");
        assert_eq!(txt("2^3*4/5"), "2 ^ 3 * 4 / 5");
        assert_eq!(txt("5!+50%"), "5 ! + 50 %");
    }

    #[test]
    fn espaces_et_caracteres_etrangers_ignores() {
        assert_eq!(txt(" 1 +  2 "), "1 + 2");
        assert_eq!(txt("2 X 3"), "2 3");
        assert_eq!(txt("1π+1"), "1 + 1");
    }

    #[test]
    fn fonctions_reconnues() {
        let t = tokenize("sqrt(4)+ln(1)");
        assert_eq!(t[0], Tok::Fonction(Fonction::Sqrt));
        assert_eq!(t[5], Tok::Fonction(Fonction::Ln));
        for f in Fonction::TOUTES {
            assert_eq!(tokenize(f.nom()), vec![Tok::Fonction(f)]);
        }
    }

    #[test]
    fn x_coupe_les_mots() {
        // "exp" -> "e" "x" "p" : x est toujours la multiplication
        let t = tokenize("exp");
        assert_eq!(
            t,
            vec![
                Tok::Inconnu("e".into()),
                Tok::Operateur(Op::FoisX),
                Tok::Inconnu("p".into()),
            ]
        );
    }

    #[test]
    fn identifiants_et_litteraux_inconnus() {
        assert_eq!(tokenize("pi"), vec![Tok::Inconnu("pi".into())]);
        assert_eq!(tokenize("SIN"), vec![Tok::Inconnu("SIN".into())]);
        assert_eq!(tokenize("1.2.3"), vec![Tok::Inconnu("1.2.3".into())]);
        assert_eq!(tokenize("."), vec![Tok::Inconnu(".".into())]);
        // chiffres et lettres se séparent
        assert_eq!(txt("2sin"), "2 sin");
    }

    #[test]
    fn moins_unaire_fusionne() {
        assert_eq!(txt("-5+3"), "-5 + 3");
        assert_eq!(txt("3*-2"), "3 * -2");
        assert_eq!(txt("3x-2"), "3 x -2");
        assert_eq!(txt("2^-1"), "2 ^ -1");
        assert_eq!(txt("sqrt(-4)"), "sqrt ( -4 )");
        assert_eq!(txt("5--3"), "5 - -3");
        assert_eq!(tokenize("-0.5").len(), 1);
    }

    #[test]
    fn moins_binaire_conserve() {
        assert_eq!(txt("5-3"), "5 - 3");
        assert_eq!(txt("(2)-3"), "( 2 ) - 3");
        assert_eq!(txt("5!-3"), "5 ! - 3");
        assert_eq!(txt("50%-1"), "50 % - 1");
        // pas de nombre derrière : reste un opérateur
        assert_eq!(txt("-(2)"), "- ( 2 )");
        assert_eq!(txt("-sin(1)"), "- sin ( 1 )");
        assert_eq!(txt("-"), "-");
    }

    #[test]
    fn double_moins_en_tete() {
        // le premier '-' n’est pas suivi d’un nombre, le second l’est
        assert_eq!(txt("--3"), "- -3");
    }
}
